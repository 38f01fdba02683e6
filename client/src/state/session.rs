//! Session store: single source of truth for "who is logged in".
//!
//! ARCHITECTURE
//! ============
//! The store subscribes to [`AuthEvents`] *before* issuing the initial
//! session fetch, so an event that fires while the fetch is in flight is
//! never lost. Event handling is split into two phases: [`apply_event`]
//! synchronously updates the snapshot and returns an optional deferred
//! action, which the store schedules as a separate task. Role lookups are
//! therefore never issued from inside the event callback itself.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use uuid::Uuid;

use crate::net::api;
use crate::net::types::AuthSession;
use crate::state::events::{AuthEvent, AuthEvents, SubscriptionId};

/// Latest known authentication state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The current session, if authenticated.
    pub session: Option<AuthSession>,
    /// True only before the first event delivery or initial fetch resolution.
    pub loading: bool,
}

impl SessionSnapshot {
    /// The state before anything has resolved.
    #[must_use]
    pub fn resolving() -> Self {
        Self { session: None, loading: true }
    }

    /// The signed-in user. Present exactly when a session is.
    #[must_use]
    pub fn user(&self) -> Option<&shared::SessionUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.user.id)
    }

    /// Whether `user_id` is the currently signed-in user.
    #[must_use]
    pub fn is_user(&self, user_id: Uuid) -> bool {
        self.user_id() == Some(user_id)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::resolving()
    }
}

/// Work the event handler schedules for a later tick instead of running inline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// Warm the role cache for the signed-in user.
    RefreshRole { user_id: Uuid },
    /// Drop all cached role grants.
    ClearRoles,
}

/// Phase 1 of event handling: synchronously fold `event` into `snapshot`.
///
/// Returns the follow-up work to schedule on a later tick (phase 2).
pub fn apply_event(snapshot: &mut SessionSnapshot, event: &AuthEvent) -> Option<DeferredAction> {
    match event {
        AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => {
            let user_id = session.user.id;
            snapshot.session = Some(session.clone());
            snapshot.loading = false;
            Some(DeferredAction::RefreshRole { user_id })
        }
        AuthEvent::SignedOut => {
            snapshot.session = None;
            snapshot.loading = false;
            Some(DeferredAction::ClearRoles)
        }
    }
}

/// Fold the initial-fetch result into `snapshot`.
///
/// If an auth event already resolved the snapshot while the fetch was in
/// flight, the (older) fetch result is discarded.
pub fn apply_initial_fetch(snapshot: &mut SessionSnapshot, fetched: Option<AuthSession>) {
    if !snapshot.loading {
        return;
    }
    snapshot.session = fetched;
    snapshot.loading = false;
}

/// Which event a session refresh should publish, given the previous state.
#[must_use]
pub fn refresh_event(was_authenticated: bool, fetched: Option<AuthSession>) -> AuthEvent {
    match fetched {
        Some(session) if was_authenticated => AuthEvent::TokenRefreshed(session),
        Some(session) => AuthEvent::SignedIn(session),
        None => AuthEvent::SignedOut,
    }
}

/// Reactive session store installed once at app startup and shared via context.
#[derive(Clone)]
pub struct SessionStore {
    snapshot: RwSignal<SessionSnapshot>,
    events: AuthEvents,
    subscription: Arc<Mutex<Option<SubscriptionId>>>,
}

impl SessionStore {
    /// Subscribe to `events`, then kick off the initial session fetch.
    ///
    /// `schedule_deferred` receives phase-2 work; the caller decides how to
    /// schedule it (a spawned task in the app, inline in tests).
    pub fn install(
        events: AuthEvents,
        schedule_deferred: impl Fn(DeferredAction) + Send + Sync + 'static,
    ) -> Self {
        let snapshot = RwSignal::new(SessionSnapshot::resolving());

        // Subscription must exist before the fetch below is issued.
        let id = events.subscribe(move |event| {
            let mut deferred = None;
            snapshot.update(|current| deferred = apply_event(current, event));
            if let Some(action) = deferred {
                schedule_deferred(action);
            }
        });

        let store = Self { snapshot, events, subscription: Arc::new(Mutex::new(Some(id))) };
        store.spawn_initial_fetch();
        store
    }

    fn spawn_initial_fetch(&self) {
        #[cfg(feature = "hydrate")]
        {
            let snapshot = self.snapshot;
            leptos::task::spawn_local(async move {
                let fetched = api::fetch_session().await;
                snapshot.update(|current| apply_initial_fetch(current, fetched));
            });
        }
    }

    /// Latest known state; `{session: None, loading: true}` before first resolution.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.get()
    }

    /// Reactive handle for components that track auth state.
    #[must_use]
    pub fn signal(&self) -> RwSignal<SessionSnapshot> {
        self.snapshot
    }

    /// Reset local state and request remote sign-out.
    ///
    /// `SignedOut` publishes before the remote call is awaited, so this
    /// client reads as logged out immediately, even while the server is
    /// still cleaning up and regardless of whether that cleanup succeeds.
    pub async fn sign_out(&self) {
        self.events.publish(&AuthEvent::SignedOut);
        api::logout().await;
    }

    /// Forward a one-time code to the server, returning its result unchanged.
    ///
    /// Does not mutate the snapshot; the `SignedIn` event published by the
    /// login flow after a successful refresh does that.
    ///
    /// # Errors
    ///
    /// Returns the server's error string when verification fails.
    pub async fn verify_one_time_code(&self, email: &str, code: &str) -> Result<(), String> {
        api::verify_code(email, code).await
    }

    /// Re-fetch the session and publish the matching auth event.
    pub async fn refresh(&self) {
        let was_authenticated = self.snapshot.get_untracked().is_authenticated();
        let fetched = api::fetch_session().await;
        self.events.publish(&refresh_event(was_authenticated, fetched));
    }

    /// Unsubscribe from the event registry. Safe to call more than once.
    pub fn teardown(&self) {
        let id = self
            .subscription
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(id) = id {
            self.events.unsubscribe(id);
        }
    }
}
