//! Cookie-consent banner.
//!
//! Prompts only while the visitor is undecided; either decision dismisses it.
//! Decisions persist to localStorage and broadcast so already-mounted gated
//! components (chat launcher, affiliate capture) react without a reload.

use leptos::prelude::*;

use crate::util::consent::{ConsentFlag, ConsentSignal, should_prompt};

#[component]
pub fn ConsentBanner() -> impl IntoView {
    let consent = expect_context::<ConsentSignal>();

    let accept = move |_| consent.record(ConsentFlag::Accepted);
    let decline = move |_| consent.record(ConsentFlag::Declined);

    view! {
        <Show when=move || should_prompt(consent.0.get())>
            <div class="consent-banner" role="dialog" aria-label="Cookie consent">
                <p class="consent-banner__text">
                    "We use a chat widget and referral cookies to run this site. "
                    "Okay to enable them?"
                </p>
                <div class="consent-banner__actions">
                    <button class="consent-banner__button consent-banner__button--accept" on:click=accept>
                        "Accept"
                    </button>
                    <button class="consent-banner__button" on:click=decline>
                        "Decline"
                    </button>
                </div>
            </div>
        </Show>
    }
}
