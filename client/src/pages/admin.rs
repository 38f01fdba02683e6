//! Admin-only playground, wrapped in the role gate.
//!
//! A scratch surface for checking the production site's moving parts: the
//! current session, the stored referral cookie, consent state, and the chat
//! widget - without touching anything a visitor sees.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

use crate::components::admin_gate::AdminGate;
use crate::state::session::SessionStore;
use crate::util::affiliate;
use crate::util::consent::{ConsentFlag, ConsentSignal};

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <AdminGate>
            <AdminPlayground />
        </AdminGate>
    }
}

#[component]
fn AdminPlayground() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let consent = expect_context::<ConsentSignal>();
    let session = store.signal();
    let navigate = use_navigate();

    let who = move || {
        session
            .get()
            .session
            .map_or_else(String::new, |s| s.user.email)
    };
    let referral = move || affiliate::stored_ref().unwrap_or_else(|| "none".to_owned());
    let consent_label = move || match consent.0.get() {
        Some(ConsentFlag::Accepted) => "accepted",
        Some(ConsentFlag::Declined) => "declined",
        None => "undecided",
    };

    let sign_out_store = store.clone();
    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let store = sign_out_store.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                store.sign_out().await;
                navigate("/", NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&sign_out_store, &navigate);
        }
    };

    let on_clear_consent = move |_| consent.clear();

    view! {
        <Title text="Playground | Mainstreet Studio" />
        <section class="playground">
            <h1>"Playground"</h1>
            <p>"Signed in as " <strong>{who}</strong></p>
            <dl class="playground__facts">
                <dt>"Stored referral"</dt>
                <dd>{referral}</dd>
                <dt>"Consent"</dt>
                <dd>{consent_label}</dd>
            </dl>
            <div class="playground__actions">
                <button class="button" on:click=on_clear_consent>
                    "Clear consent (re-prompt)"
                </button>
                <button class="button" on:click=on_sign_out>
                    "Sign out"
                </button>
            </div>
        </section>
    }
}
