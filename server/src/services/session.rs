//! Session management.
//!
//! ARCHITECTURE
//! ============
//! HTTP auth uses long-lived opaque session tokens carried in an HttpOnly
//! cookie. The token is a 32-byte random hex string stored as the primary
//! key; validation joins through to the user row in one query.

use std::fmt::Write;

use rand::Rng;
use shared::SessionUser;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// A validated session: the user plus when the session lapses.
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    pub user: SessionUser,
    pub expires_at: OffsetDateTime,
}

impl ValidatedSession {
    /// RFC 3339 expiry string for the session response payload.
    #[must_use]
    pub fn expires_at_rfc3339(&self) -> Option<String> {
        self.expires_at.format(&Rfc3339).ok()
    }
}

/// Create a session for the given user, returning the token.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<ValidatedSession>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.email, u.name, s.expires_at
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| ValidatedSession {
        user: SessionUser {
            id: r.get("id"),
            email: r.get("email"),
            name: r.get("name"),
        },
        expires_at: r.get("expires_at"),
    }))
}

/// Delete a session by token. Idempotent.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
