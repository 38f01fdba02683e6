//! Admin login page: email one-time codes, login links, and access resets.
//!
//! The guard redirects here with `?from=` carrying the originally requested
//! location and `&denied=1` when a signed-in user lacked the admin role.

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_query_map;

use crate::state::session::SessionStore;

/// Where to send the user after a successful sign-in.
///
/// Only same-site paths are honored, so a crafted `?from=` can't bounce a
/// fresh admin session to another origin.
#[must_use]
pub fn return_target(from: Option<&str>) -> String {
    match from {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_owned(),
        _ => "/admin".to_owned(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let query = use_query_map();

    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let denied = move || query.get().get("denied").is_some();

    let on_request_code = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            info.set("Enter an email first.".to_owned());
            return;
        }
        busy.set(true);
        info.set("Requesting code...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::request_login_code(&email_value).await {
                Ok(()) => info.set("Code sent. Check your email.".to_owned()),
                Err(e) => info.set(format!("Code request failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = email_value;
    };

    let on_request_link = move |_| {
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            info.set("Enter an email first.".to_owned());
            return;
        }
        busy.set(true);
        info.set("Requesting link...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::request_login_link(&email_value).await {
                Ok(()) => info.set("Login link sent. Check your email.".to_owned()),
                Err(e) => info.set(format!("Link request failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = email_value;
    };

    let on_request_reset = move |_| {
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            info.set("Enter an email first.".to_owned());
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::request_reset_link(&email_value).await {
                Ok(()) => info.set("Reset link sent. Check your email.".to_owned()),
                Err(e) => info.set(format!("Reset request failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = email_value;
    };

    let verify_store = store.clone();
    let on_verify_code = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let code_value = code.get().trim().to_owned();
        if email_value.is_empty() || code_value.is_empty() {
            info.set("Enter both email and code.".to_owned());
            return;
        }
        busy.set(true);
        info.set("Verifying code...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let store = verify_store.clone();
            let target = return_target(query.get_untracked().get("from").as_deref());
            leptos::task::spawn_local(async move {
                match store.verify_one_time_code(&email_value, &code_value).await {
                    Ok(()) => {
                        // Publishing the SignedIn event is refresh's job; the
                        // verify call itself never mutates session state.
                        store.refresh().await;
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&target);
                        }
                    }
                    Err(e) => {
                        info.set(format!("Verification failed: {e}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&verify_store, email_value, code_value);
        }
    };

    view! {
        <Title text="Sign in | Mainstreet Studio" />
        <div class="login-page">
            <div class="login-card">
                <h1>"Admin sign-in"</h1>
                <Show when=denied>
                    <p class="login-message login-message--denied">
                        "That account doesn't have admin access."
                    </p>
                </Show>
                <form class="login-form" on:submit=on_request_code>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Email me a code"
                    </button>
                </form>
                <form class="login-form" on:submit=on_verify_code>
                    <input
                        class="login-input login-input--code"
                        type="text"
                        maxlength="6"
                        placeholder="ABC234"
                        prop:value=move || code.get()
                        on:input=move |ev| code.set(event_target_value(&ev).to_ascii_uppercase())
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in with code"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <button class="login-link-button" on:click=on_request_link disabled=move || busy.get()>
                    "Email me a login link instead"
                </button>
                <button class="login-link-button" on:click=on_request_reset disabled=move || busy.get()>
                    "Lost access? Send a reset link"
                </button>
            </div>
        </div>
    }
}
