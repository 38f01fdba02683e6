//! Role resolver: cached answers to "does user X hold role Y".
//!
//! TRADE-OFFS
//! ==========
//! Grants are trusted for a bounded freshness window, so a role revoked
//! server-side can remain effective on this client for up to
//! `FRESHNESS_WINDOW_MS` after the last check. That window is the accepted
//! cost of not re-querying on every render; tighten it here if that ever
//! becomes unacceptable.

#[cfg(test)]
#[path = "roles_test.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::net::api;

/// How long a cached grant is trusted before it must be re-fetched.
pub const FRESHNESS_WINDOW_MS: f64 = 5.0 * 60.0 * 1000.0;

/// A cached yes/no role answer and when it was fetched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleGrant {
    pub granted: bool,
    pub fetched_at_ms: f64,
}

impl RoleGrant {
    #[must_use]
    pub fn is_fresh(&self, now_ms: f64) -> bool {
        now_ms - self.fetched_at_ms < FRESHNESS_WINDOW_MS
    }
}

/// Consumer-facing view of a role check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleCheck {
    pub granted: bool,
    pub loading: bool,
}

impl RoleCheck {
    /// Check still in flight.
    #[must_use]
    pub fn pending() -> Self {
        Self { granted: false, loading: true }
    }

    /// Resolved check.
    #[must_use]
    pub fn resolved(granted: bool) -> Self {
        Self { granted, loading: false }
    }

    /// The unauthenticated answer: no user, no role, nothing to wait for.
    #[must_use]
    pub fn denied() -> Self {
        Self::resolved(false)
    }
}

/// Outcome of consulting the cache without touching the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheLookup {
    /// A grant within the freshness window.
    Fresh(bool),
    /// Nothing cached, or the entry aged out.
    Miss,
}

/// Process-wide role grant cache keyed by `(user_id, role)`.
#[derive(Clone, Default)]
pub struct RoleResolver {
    cache: Arc<Mutex<HashMap<(Uuid, String), RoleGrant>>>,
}

impl RoleResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult the cache only.
    #[must_use]
    pub fn lookup(&self, user_id: Uuid, role: &str, now_ms: f64) -> CacheLookup {
        let cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match cache.get(&(user_id, role.to_owned())) {
            Some(grant) if grant.is_fresh(now_ms) => CacheLookup::Fresh(grant.granted),
            _ => CacheLookup::Miss,
        }
    }

    /// Record a freshly fetched grant.
    pub fn insert(&self, user_id: Uuid, role: &str, granted: bool, now_ms: f64) {
        let mut cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        cache.insert((user_id, role.to_owned()), RoleGrant { granted, fetched_at_ms: now_ms });
    }

    /// Drop every cached grant. Called when the owning user signs out.
    pub fn evict_all(&self) {
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }

    /// Answer "does `user_id` hold `role`", hitting the network only on a
    /// cache miss.
    ///
    /// A remote failure resolves to `false` (fail closed) and is logged;
    /// failures are not cached, so the next call retries.
    pub async fn resolve(&self, user_id: Option<Uuid>, role: &str) -> bool {
        let Some(user_id) = user_id else {
            return false;
        };

        if let CacheLookup::Fresh(granted) = self.lookup(user_id, role, now_ms()) {
            return granted;
        }

        match api::has_role(user_id, role).await {
            Ok(granted) => {
                self.insert(user_id, role, granted, now_ms());
                granted
            }
            Err(_error) => {
                #[cfg(feature = "hydrate")]
                log::warn!("role check for {role} failed, treating as not granted: {_error}");
                false
            }
        }
    }
}

/// Milliseconds since the Unix epoch on the current platform.
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |elapsed| elapsed.as_secs_f64() * 1000.0)
    }
}
