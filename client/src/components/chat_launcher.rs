//! Floating chat launcher button.
//!
//! Mounts on every page but stays inert until consent is accepted and a
//! widget id is configured. The vendor script is attached through the shared
//! [`ChatLoader`] cell, so navigating between pages never duplicates the
//! script tag; a failed load leaves the cell retryable on the next click.

use leptos::prelude::*;

use crate::util::chat::{ChatLoader, configured_widget_id};
use crate::util::consent::{ConsentSignal, unlocks_loaders};

#[component]
pub fn ChatLauncher() -> impl IntoView {
    let consent = expect_context::<ConsentSignal>();
    let loader = expect_context::<ChatLoader>();

    // Consent is re-read reactively, covering acceptance after mount.
    let eligible = move || unlocks_loaders(consent.0.get()) && configured_widget_id().is_some();

    // Pre-warm the script once consent lands, so the first click is instant.
    Effect::new({
        let loader = loader.clone();
        move || {
            if !eligible() {
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let loader = loader.clone();
                leptos::task::spawn_local(async move {
                    if let Err(error) = crate::util::chat::ensure_widget(&loader).await {
                        log::warn!("chat widget preload failed: {error}");
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = &loader;
            }
        }
    });

    let click_loader = loader.clone();
    let on_click = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let loader = click_loader.clone();
            leptos::task::spawn_local(async move {
                match crate::util::chat::ensure_widget(&loader).await {
                    Ok(()) => crate::util::chat::toggle_panel(),
                    Err(error) => log::warn!("chat widget unavailable: {error}"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &click_loader;
        }
    };

    view! {
        <Show when=eligible>
            <button class="chat-launcher" aria-label="Chat with us" on:click=on_click.clone()>
                "Chat"
            </button>
        </Show>
    }
}
