//! Route guard decision logic.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AdminGate` (components) renders one of four outcomes computed here from
//! the session snapshot and the admin role check. Keeping the decision a
//! pure function makes the full transition table testable without a router.
//!
//! The one ordering rule that matters: an authenticated user whose role
//! check is still in flight stays `Pending`. Deciding `Forbidden` early
//! would bounce a legitimate admin to the login screen during the window
//! before the check resolves.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use crate::state::roles::RoleCheck;
use crate::state::session::SessionSnapshot;

/// What the guard should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session or role state still resolving: neutral loading indicator.
    Pending,
    /// No session: redirect to login, carrying the requested location.
    Unauthenticated,
    /// Session but no role grant: redirect to login with an access-denied marker.
    Forbidden,
    /// Render the protected content.
    Authorized,
}

/// Decide the render outcome for the current `(session, role)` pair.
#[must_use]
pub fn decide(session: &SessionSnapshot, role: &RoleCheck) -> GuardOutcome {
    if session.loading {
        return GuardOutcome::Pending;
    }
    if !session.is_authenticated() {
        return GuardOutcome::Unauthenticated;
    }
    if role.loading {
        return GuardOutcome::Pending;
    }
    if role.granted {
        GuardOutcome::Authorized
    } else {
        GuardOutcome::Forbidden
    }
}

/// Login URL carrying the origin path, plus the denied marker for
/// authenticated-but-unauthorized visitors.
#[must_use]
pub fn login_redirect(from: &str, denied: bool) -> String {
    if denied {
        format!("/login?from={from}&denied=1")
    } else {
        format!("/login?from={from}")
    }
}
