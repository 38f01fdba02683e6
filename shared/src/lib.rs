//! Shared wire types for the Mainstreet site API.
//!
//! This crate owns the JSON request/response schema used by both `server`
//! and `client`. Every endpoint responds either with its typed payload or
//! with the `{error}` envelope, so failure bodies look the same everywhere.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

/// Role name gating the admin playground.
pub const ROLE_ADMIN: &str = "admin";

/// Authenticated user as exposed to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Normalized email address the account is keyed by.
    pub email: String,
    /// Display name derived from the email local part.
    pub name: String,
}

/// Body of `GET /api/auth/session` when a valid session cookie is present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: SessionUser,
    /// RFC 3339 expiry of the backing session token, when known.
    pub expires_at: Option<String>,
}

/// Generic success envelope: `{"success": true}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiOk {
    pub success: bool,
}

impl ApiOk {
    #[must_use]
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for ApiOk {
    fn default() -> Self {
        Self::new()
    }
}

/// Generic failure envelope: `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

/// Body accepted by the three email-dispatch endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Body of `POST /api/auth/verify-code`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

/// Body of `POST /api/auth/has-role`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasRoleRequest {
    pub user_id: Uuid,
    pub role: String,
}

/// Body returned by `POST /api/auth/has-role`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasRoleResponse {
    pub granted: bool,
}
