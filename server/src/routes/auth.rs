//! Auth routes: session lookup, code verification, link callback, role checks.

use axum::extract::{FromRef, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use shared::{ApiError, ApiOk, HasRoleRequest, HasRoleResponse, ROLE_ADMIN, SessionResponse, VerifyCodeRequest};
use time::Duration;

use crate::services::{email_auth, roles, session};
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("PUBLIC_BASE_URL")
        .map(|url| url.starts_with("https://"))
        .unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiError { error: message.to_owned() })).into_response()
}

/// Complete a successful email login: upsert the user, grant admin if the
/// address is allow-listed, and open a session.
async fn establish_session(state: &AppState, normalized_email: &str) -> Result<String, sqlx::Error> {
    let user_id = email_auth::ensure_user(&state.pool, normalized_email).await?;
    if state.allowlist.is_allowed(normalized_email) {
        roles::grant_role(&state.pool, user_id, ROLE_ADMIN).await?;
    }
    session::create_session(&state.pool, user_id).await
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: shared::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let validated = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user: validated.user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/session` - return the current session, or 401.
pub async fn current_session(State(state): State<AppState>, jar: CookieJar) -> Response {
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    if token.is_empty() {
        return error_response(StatusCode::UNAUTHORIZED, "not authenticated");
    }

    match session::validate_session(&state.pool, token).await {
        Ok(Some(validated)) => {
            let expires_at = validated.expires_at_rfc3339();
            Json(SessionResponse { user: validated.user, expires_at }).into_response()
        }
        Ok(None) => error_response(StatusCode::UNAUTHORIZED, "not authenticated"),
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "session lookup failed")
        }
    }
}

/// `POST /api/auth/logout` - delete the session, clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value) {
        let _ = session::delete_session(&state.pool, token).await;
    }

    let jar = CookieJar::new().add(clear_session_cookie());
    (jar, Json(ApiOk { success: true })).into_response()
}

/// `POST /api/auth/verify-code` - exchange a six-character code for a session.
pub async fn verify_code(State(state): State<AppState>, Json(req): Json<VerifyCodeRequest>) -> Response {
    let Some(normalized) = email_auth::normalize_email(&req.email) else {
        return error_response(StatusCode::BAD_REQUEST, "invalid email");
    };

    match email_auth::verify_access_code(&state.pool, &normalized, &req.code).await {
        Ok(_user_id) => match establish_session(&state, &normalized).await {
            Ok(token) => {
                let jar = CookieJar::new().add(session_cookie(token));
                (jar, Json(ApiOk { success: true })).into_response()
            }
            Err(e) => {
                tracing::error!(error = %e, "session creation failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to create session")
            }
        },
        Err(e @ (email_auth::EmailAuthError::InvalidEmail
            | email_auth::EmailAuthError::InvalidCode
            | email_auth::EmailAuthError::VerificationFailed)) => {
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "code verification failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "verification failed")
        }
    }
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    token: String,
}

/// `GET /api/auth/callback` - consume a one-time link token, set the cookie,
/// and land in the admin area. Spent or unknown tokens bounce to the login
/// page with an error marker.
pub async fn link_callback(State(state): State<AppState>, Query(params): Query<CallbackQuery>) -> Response {
    let consumed = match email_auth::consume_link_token(&state.pool, &params.token).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "link token lookup failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "link lookup failed");
        }
    };

    let Some((email, _purpose)) = consumed else {
        return Redirect::temporary("/login?error=invalid-link").into_response();
    };

    match establish_session(&state, &email).await {
        Ok(token) => {
            let jar = CookieJar::new().add(session_cookie(token));
            (jar, Redirect::temporary("/admin")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to create session")
        }
    }
}

/// `POST /api/auth/has-role` - check a role grant for the calling user.
///
/// Callers may only ask about themselves; asking about another user is
/// refused rather than answered.
pub async fn has_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<HasRoleRequest>,
) -> Response {
    if req.user_id != auth.user.id {
        return error_response(StatusCode::FORBIDDEN, "role checks are limited to the current user");
    }

    match roles::has_role(&state.pool, req.user_id, &req.role).await {
        Ok(granted) => Json(HasRoleResponse { granted }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "role lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "role lookup failed")
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
