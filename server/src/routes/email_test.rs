use axum::body::to_bytes;
use shared::ApiError;
use sqlx::postgres::PgPoolOptions;

use super::*;
use crate::services::allowlist::Allowlist;

// A lazy pool never connects, so admission paths that stop before any query
// can run against it.
fn test_state(allowlist: &str, mailer: Option<MailerConfig>) -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    AppState::new(pool, mailer, Allowlist::parse(allowlist))
}

fn test_mailer() -> MailerConfig {
    MailerConfig::new("re_test_key".to_owned(), "hello@mainstreet.example".to_owned())
}

async fn error_body(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice::<ApiError>(&bytes).unwrap().error
}

#[tokio::test]
async fn invalid_email_is_rejected_with_400() {
    let state = test_state("owner@example.com", Some(test_mailer()));
    let resp = admit(&state, "not-an-email").unwrap_err();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(resp).await, "invalid email");
}

#[tokio::test]
async fn address_outside_allowlist_gets_403() {
    let state = test_state("owner@example.com", Some(test_mailer()));
    let resp = admit(&state, "stranger@example.com").unwrap_err();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_body(resp).await, "email is not eligible");
}

#[tokio::test]
async fn unconfigured_mailer_gets_500() {
    let state = test_state("owner@example.com", None);
    let resp = admit(&state, "owner@example.com").unwrap_err();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_body(resp).await, "email delivery unavailable");
}

#[tokio::test]
async fn admitted_address_is_normalized() {
    let state = test_state("owner@example.com", Some(test_mailer()));
    let (email, _config) = admit(&state, "  Owner@Example.COM ").unwrap();
    assert_eq!(email, "owner@example.com");
}

#[tokio::test]
async fn callback_url_embeds_token_under_base() {
    let state = test_state("owner@example.com", Some(test_mailer()));
    let url = callback_url(&state, "abc123");
    assert!(url.ends_with("/api/auth/callback?token=abc123"));
    assert!(url.starts_with("http"));
}
