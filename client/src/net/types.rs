//! Client-side view of the shared wire schema.
//!
//! DESIGN
//! ======
//! Wire payloads live in the `shared` crate; this module re-exports them and
//! adds the one client-only composite the session store works with.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use shared::SessionResponse;
pub use shared::SessionUser;

/// An authenticated user together with its credential handle.
///
/// Bundling the two means "user present iff session present" holds by
/// construction: the session store only ever holds `Option<AuthSession>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: SessionUser,
    /// RFC 3339 expiry of the backing session token, when the server reports one.
    pub expires_at: Option<String>,
}

impl From<SessionResponse> for AuthSession {
    fn from(resp: SessionResponse) -> Self {
        Self { user: resp.user, expires_at: resp.expires_at }
    }
}
