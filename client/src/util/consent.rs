//! Cookie-consent flag persisted in localStorage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Third-party loaders (chat widget, affiliate capture) only run once the
//! visitor has accepted. Absence of a stored value means "undecided", which
//! is distinct from an explicit decline: both suppress the banner once
//! decided, but only an acceptance unlocks the loaders. Decisions are
//! broadcast through a reactive signal plus a window event so components
//! mounted before the decision become eligible without a reload.

#[cfg(test)]
#[path = "consent_test.rs"]
mod tests;

use leptos::prelude::*;

pub const STORAGE_KEY: &str = "mainstreet_consent";

/// DOM event dispatched on `window` whenever the decision changes.
pub const CHANGE_EVENT: &str = "mainstreet-consentchange";

/// An explicit visitor decision. `None` elsewhere means undecided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentFlag {
    Accepted,
    Declined,
}

impl ConsentFlag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    /// Parse a stored value. Unknown strings are treated as undecided so a
    /// corrupted entry re-prompts instead of silently unlocking anything.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// Whether the loaders may run under `decision`.
#[must_use]
pub fn unlocks_loaders(decision: Option<ConsentFlag>) -> bool {
    decision == Some(ConsentFlag::Accepted)
}

/// Whether the banner should prompt under `decision`.
#[must_use]
pub fn should_prompt(decision: Option<ConsentFlag>) -> bool {
    decision.is_none()
}

/// Reactive handle to the current decision, provided via context at app root.
#[derive(Clone, Copy)]
pub struct ConsentSignal(pub RwSignal<Option<ConsentFlag>>);

impl ConsentSignal {
    /// Seed the signal from storage.
    #[must_use]
    pub fn install() -> Self {
        Self(RwSignal::new(read_stored()))
    }

    #[must_use]
    pub fn current(&self) -> Option<ConsentFlag> {
        self.0.get()
    }

    /// Persist `flag` and broadcast the change.
    pub fn record(&self, flag: ConsentFlag) {
        write_stored(Some(flag));
        self.0.set(Some(flag));
        broadcast_change();
    }

    /// Forget the stored decision, forcing a re-prompt.
    pub fn clear(&self) {
        write_stored(None);
        self.0.set(None);
        broadcast_change();
    }
}

/// Read the persisted decision from localStorage (browser only).
#[must_use]
pub fn read_stored() -> Option<ConsentFlag> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(STORAGE_KEY).ok().flatten()?;
        ConsentFlag::parse(&raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

fn write_stored(decision: Option<ConsentFlag>) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        match decision {
            Some(flag) => {
                let _ = storage.set_item(STORAGE_KEY, flag.as_str());
            }
            None => {
                let _ = storage.remove_item(STORAGE_KEY);
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = decision;
    }
}

fn broadcast_change() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(event) = web_sys::CustomEvent::new(CHANGE_EVENT) {
                let _ = window.dispatch_event(&event);
            }
        }
    }
}

/// Re-read storage into the signal when another code path broadcasts a change.
pub fn install_change_listener(signal: ConsentSignal) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::prelude::Closure;

        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::<dyn Fn()>::new(move || {
            signal.0.set(read_stored());
        });
        let _ = window
            .add_event_listener_with_callback(CHANGE_EVENT, callback.as_ref().unchecked_ref());
        // Listener lives for the page's lifetime.
        callback.forget();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = signal;
    }
}
