use shared::SessionResponse;
use uuid::Uuid;

use super::*;

fn user() -> SessionUser {
    SessionUser { id: Uuid::nil(), email: "owner@mainstreet.test".to_owned(), name: "owner".to_owned() }
}

#[test]
fn auth_session_from_response_carries_user_and_expiry() {
    let resp = SessionResponse { user: user(), expires_at: Some("2026-09-01T00:00:00Z".to_owned()) };
    let session = AuthSession::from(resp);
    assert_eq!(session.user.email, "owner@mainstreet.test");
    assert_eq!(session.expires_at.as_deref(), Some("2026-09-01T00:00:00Z"));
}

#[test]
fn auth_session_round_trips_through_json() {
    let session = AuthSession { user: user(), expires_at: None };
    let json = serde_json::to_string(&session).unwrap();
    let back: AuthSession = serde_json::from_str(&json).unwrap();
    assert_eq!(back, session);
}
