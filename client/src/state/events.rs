//! Auth event registry.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sign-in, sign-out, and token-refresh flows publish events here instead of
//! mutating session state directly. The session store subscribes before any
//! network fetch is issued, so an event fired mid-fetch is never lost. The
//! registry is an explicit injected handle (provided via context) rather than
//! an ambient global, so tests can construct fresh instances.

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use std::sync::{Arc, Mutex};

use crate::net::types::AuthSession;

/// Authentication state-change event emitted by login/logout flows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// A session was established where none existed.
    SignedIn(AuthSession),
    /// An existing session's credentials were renewed.
    TokenRefreshed(AuthSession),
    /// The session ended.
    SignedOut,
}

/// Handle returned by [`AuthEvents::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

/// Subscription registry delivering auth events in registration order.
#[derive(Clone, Default)]
pub struct AuthEvents {
    inner: Arc<Mutex<Registry>>,
}

impl AuthEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Events are delivered in registration order.
    pub fn subscribe(&self, f: impl Fn(&AuthEvent) + Send + Sync + 'static) -> SubscriptionId {
        let mut registry = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.subscribers.push((id, Arc::new(f)));
        id
    }

    /// Remove a subscriber. Safe to call repeatedly with the same id.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut registry = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        registry.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Deliver `event` to every current subscriber, in registration order.
    ///
    /// The subscriber list is snapshotted before delivery so a callback may
    /// subscribe or unsubscribe without deadlocking the registry.
    pub fn publish(&self, event: &AuthEvent) {
        let subscribers: Vec<Subscriber> = {
            let registry = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            registry.subscribers.iter().map(|(_, f)| Arc::clone(f)).collect()
        };
        for subscriber in subscribers {
            subscriber(event);
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .subscribers
            .len()
    }
}
