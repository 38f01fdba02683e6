//! Email dispatch routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three endpoints with one contract: accept `{ "email": ... }`, send the
//! matching email, answer `{ "success": true }` or `{ "error": ... }`.
//! Malformed addresses get 400, addresses outside the allow-list get 403,
//! and delivery or storage failures get 500.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::{ApiOk, EmailRequest};

use crate::routes::auth::{env_bool, error_response};
use crate::services::email_auth::{self, LinkPurpose};
use crate::services::mailer::{self, MailerConfig};
use crate::state::AppState;

/// Local-dev escape hatch: with `EMAIL_ECHO=true` and no mailer configured,
/// codes and links are logged instead of sent.
fn echo_mode_enabled() -> bool {
    env_bool("EMAIL_ECHO").unwrap_or(false)
}

/// Admission shared by all three endpoints: normalize, allow-list, and make
/// sure delivery is even possible before creating anything. `None` for the
/// mailer means echo mode.
fn admit<'a>(state: &'a AppState, email: &str) -> Result<(String, Option<&'a MailerConfig>), Response> {
    let Some(normalized) = email_auth::normalize_email(email) else {
        return Err(error_response(StatusCode::BAD_REQUEST, "invalid email"));
    };

    if !state.allowlist.is_allowed(&normalized) {
        return Err(error_response(StatusCode::FORBIDDEN, "email is not eligible"));
    }

    match state.mailer.as_ref() {
        Some(config) => Ok((normalized, Some(config))),
        None if echo_mode_enabled() => Ok((normalized, None)),
        None => {
            tracing::warn!("email dispatch requested but mailer is unconfigured");
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, "email delivery unavailable"))
        }
    }
}

fn callback_url(state: &AppState, token: &str) -> String {
    format!("{}/api/auth/callback?token={token}", state.base_url)
}

/// `POST /api/email/login-code` - create and send a six-character code.
pub async fn send_login_code(State(state): State<AppState>, Json(req): Json<EmailRequest>) -> Response {
    let (email, config) = match admit(&state, &req.email) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let code = match email_auth::request_access_code(&state.pool, &email).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "access code creation failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to create code");
        }
    };

    match config {
        Some(config) => {
            if let Err(e) = mailer::send_login_code(config, &email, &code).await {
                tracing::error!(error = %e, "login code delivery failed");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to send email");
            }
        }
        None => tracing::info!(%email, %code, "echo mode: login code not emailed"),
    }

    Json(ApiOk { success: true }).into_response()
}

/// `POST /api/email/login-link` - create and send a one-time sign-in link.
pub async fn send_login_link(State(state): State<AppState>, Json(req): Json<EmailRequest>) -> Response {
    dispatch_link(&state, &req.email, LinkPurpose::Login).await
}

/// `POST /api/email/reset-link` - create and send a one-time reset link.
pub async fn send_reset_link(State(state): State<AppState>, Json(req): Json<EmailRequest>) -> Response {
    dispatch_link(&state, &req.email, LinkPurpose::Reset).await
}

async fn dispatch_link(state: &AppState, email: &str, purpose: LinkPurpose) -> Response {
    let (email, config) = match admit(state, email) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let token = match email_auth::request_link_token(&state.pool, &email, purpose).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, purpose = purpose.as_str(), "link token creation failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to create link");
        }
    };

    let link = callback_url(state, &token);
    match config {
        Some(config) => {
            let sent = match purpose {
                LinkPurpose::Login => mailer::send_login_link(config, &email, &link).await,
                LinkPurpose::Reset => mailer::send_reset_link(config, &email, &link).await,
            };
            if let Err(e) = sent {
                tracing::error!(error = %e, purpose = purpose.as_str(), "link delivery failed");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to send email");
            }
        }
        None => tracing::info!(%email, %link, purpose = purpose.as_str(), "echo mode: link not emailed"),
    }

    Json(ApiOk { success: true }).into_response()
}

#[cfg(test)]
#[path = "email_test.rs"]
mod tests;
