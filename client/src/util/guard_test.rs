use uuid::Uuid;

use super::*;
use crate::net::types::{AuthSession, SessionUser};

fn authenticated() -> SessionSnapshot {
    SessionSnapshot {
        session: Some(AuthSession {
            user: SessionUser {
                id: Uuid::new_v4(),
                email: "owner@mainstreet.test".to_owned(),
                name: "owner".to_owned(),
            },
            expires_at: None,
        }),
        loading: false,
    }
}

fn unauthenticated() -> SessionSnapshot {
    SessionSnapshot { session: None, loading: false }
}

// =============================================================================
// Decision table
// =============================================================================

#[test]
fn loading_session_is_pending_regardless_of_role() {
    let session = SessionSnapshot::resolving();
    assert_eq!(decide(&session, &RoleCheck::pending()), GuardOutcome::Pending);
    assert_eq!(decide(&session, &RoleCheck::resolved(true)), GuardOutcome::Pending);
    assert_eq!(decide(&session, &RoleCheck::denied()), GuardOutcome::Pending);
}

#[test]
fn resolved_session_without_user_is_unauthenticated() {
    assert_eq!(decide(&unauthenticated(), &RoleCheck::denied()), GuardOutcome::Unauthenticated);
    // Role state is irrelevant once there is no user.
    assert_eq!(decide(&unauthenticated(), &RoleCheck::resolved(true)), GuardOutcome::Unauthenticated);
}

#[test]
fn authenticated_with_role_pending_stays_pending_not_forbidden() {
    assert_eq!(decide(&authenticated(), &RoleCheck::pending()), GuardOutcome::Pending);
}

#[test]
fn authenticated_without_grant_is_forbidden() {
    assert_eq!(decide(&authenticated(), &RoleCheck::resolved(false)), GuardOutcome::Forbidden);
}

#[test]
fn authenticated_with_grant_is_authorized() {
    assert_eq!(decide(&authenticated(), &RoleCheck::resolved(true)), GuardOutcome::Authorized);
}

#[test]
fn full_admin_arrival_sequence() {
    // Session resolving -> loading.
    let mut session = SessionSnapshot::resolving();
    let mut role = RoleCheck::denied();
    assert_eq!(decide(&session, &role), GuardOutcome::Pending);

    // Session arrives, role query kicked off -> still loading.
    session = authenticated();
    role = RoleCheck::pending();
    assert_eq!(decide(&session, &role), GuardOutcome::Pending);

    // Role denied -> redirect with denied marker.
    role = RoleCheck::resolved(false);
    assert_eq!(decide(&session, &role), GuardOutcome::Forbidden);

    // Role granted (after a fresh grant server-side) -> content.
    role = RoleCheck::resolved(true);
    assert_eq!(decide(&session, &role), GuardOutcome::Authorized);
}

// =============================================================================
// Redirect URLs
// =============================================================================

#[test]
fn login_redirect_carries_origin() {
    assert_eq!(login_redirect("/admin", false), "/login?from=/admin");
}

#[test]
fn denied_redirect_adds_marker() {
    assert_eq!(login_redirect("/admin", true), "/login?from=/admin&denied=1");
}
