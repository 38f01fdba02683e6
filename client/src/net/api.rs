//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics, so auth and role
//! fetch failures degrade to fail-closed state without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use uuid::Uuid;

use super::types::AuthSession;
#[cfg(feature = "hydrate")]
use shared::{HasRoleRequest, HasRoleResponse, SessionResponse};

pub const SESSION_ENDPOINT: &str = "/api/auth/session";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const VERIFY_CODE_ENDPOINT: &str = "/api/auth/verify-code";
pub const HAS_ROLE_ENDPOINT: &str = "/api/auth/has-role";
pub const LOGIN_CODE_ENDPOINT: &str = "/api/email/login-code";
pub const LOGIN_LINK_ENDPOINT: &str = "/api/email/login-link";
pub const RESET_LINK_ENDPOINT: &str = "/api/email/reset-link";

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(what: &str, status: u16) -> String {
    format!("{what} request failed: {status}")
}

/// Extract the server's `{error}` body, falling back to the HTTP status.
#[cfg(any(test, feature = "hydrate"))]
fn error_from_body(what: &str, status: u16, body: Option<&str>) -> String {
    body.and_then(|raw| serde_json::from_str::<shared::ApiError>(raw).ok())
        .map_or_else(|| request_failed_message(what, status), |e| e.error)
}

/// Fetch the current session from the server, if the session cookie is valid.
/// Returns `None` when unauthenticated, on error, or on the server.
pub async fn fetch_session() -> Option<AuthSession> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(SESSION_ENDPOINT).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        let body: SessionResponse = resp.json().await.ok()?;
        Some(AuthSession::from(body))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// End the current session via `POST /api/auth/logout`. Best-effort.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post(LOGOUT_ENDPOINT).send().await;
    }
}

/// Verify an emailed one-time code via `POST /api/auth/verify-code`.
///
/// # Errors
///
/// Returns the server's error string when the request fails or the code is
/// rejected.
pub async fn verify_code(email: &str, code: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = shared::VerifyCodeRequest { email: email.to_owned(), code: code.to_owned() };
        let resp = gloo_net::http::Request::post(VERIFY_CODE_ENDPOINT)
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let body = resp.text().await.ok();
            return Err(error_from_body("verify code", resp.status(), body.as_deref()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, code);
        Err("not available on server".to_owned())
    }
}

/// Ask the server whether `user_id` holds `role`.
///
/// # Errors
///
/// Returns an error string when the request fails; callers treat that as
/// "not granted".
pub async fn has_role(user_id: Uuid, role: &str) -> Result<bool, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = HasRoleRequest { user_id, role: role.to_owned() };
        let resp = gloo_net::http::Request::post(HAS_ROLE_ENDPOINT)
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("role check", resp.status()));
        }
        let body: HasRoleResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.granted)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (user_id, role);
        Err("not available on server".to_owned())
    }
}

/// POST `{email}` to one of the email-dispatch endpoints.
///
/// # Errors
///
/// Returns the server's `{error}` message (allow-list rejections, delivery
/// failures) or a generic status message.
#[cfg(feature = "hydrate")]
async fn send_email_request(endpoint: &str, what: &str, email: &str) -> Result<(), String> {
    let payload = shared::EmailRequest { email: email.to_owned() };
    let resp = gloo_net::http::Request::post(endpoint)
        .json(&payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        let body = resp.text().await.ok();
        return Err(error_from_body(what, resp.status(), body.as_deref()));
    }
    Ok(())
}

/// Request a one-time login code email.
///
/// # Errors
///
/// Returns the server's error string when the request is rejected.
pub async fn request_login_code(email: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        send_email_request(LOGIN_CODE_ENDPOINT, "login code", email).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err("not available on server".to_owned())
    }
}

/// Request a one-time login link email.
///
/// # Errors
///
/// Returns the server's error string when the request is rejected.
pub async fn request_login_link(email: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        send_email_request(LOGIN_LINK_ENDPOINT, "login link", email).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err("not available on server".to_owned())
    }
}

/// Request an access-reset link email.
///
/// # Errors
///
/// Returns the server's error string when the request is rejected.
pub async fn request_reset_link(email: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        send_email_request(RESET_LINK_ENDPOINT, "reset link", email).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err("not available on server".to_owned())
    }
}
