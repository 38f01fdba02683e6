//! Email login service: short-lived access codes and one-time login links.
//!
//! ARCHITECTURE
//! ============
//! Both flows start from a bare email address. Codes are six characters from
//! a confusion-free alphabet, hashed before storage, and throttled by a
//! failed-attempt counter. Links carry a 32-byte hex token, also stored
//! hashed, consumed destructively on first use.
//!
//! TRADE-OFFS
//! ==========
//! Requesting a new code or link invalidates any earlier unconsumed one for
//! the same address, so only the most recent email is ever honored.

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::services::session::bytes_to_hex;

const CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MAX_FAILED_ATTEMPTS: i32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum EmailAuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid code")]
    InvalidCode,
    #[error("expired or incorrect code")]
    VerificationFailed,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("email delivery failed: {0}")]
    EmailDelivery(String),
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized = code.trim().to_ascii_uppercase();
    if normalized.len() != CODE_LEN
        || !normalized
            .chars()
            .all(|c| CODE_ALPHABET.contains(&(c as u8)))
    {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn generate_access_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[must_use]
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

fn name_from_email(email: &str) -> String {
    let local = email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("user");
    local.to_owned()
}

/// Upsert the user row for an address, returning its id.
pub async fn ensure_user(pool: &PgPool, normalized_email: &str) -> Result<Uuid, sqlx::Error> {
    let name = name_from_email(normalized_email);
    let row = sqlx::query(
        r"INSERT INTO users (email, name)
          VALUES ($1, $2)
          ON CONFLICT (email) DO UPDATE SET name = users.name
          RETURNING id",
    )
    .bind(normalized_email)
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row.get("id"))
}

/// Create a fresh access code for an email, invalidating prior ones.
/// Returns the plain code for delivery; only its hash is stored.
pub async fn request_access_code(pool: &PgPool, email: &str) -> Result<String, EmailAuthError> {
    let normalized = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    ensure_user(pool, &normalized).await?;

    sqlx::query("DELETE FROM login_codes WHERE email = $1 AND consumed_at IS NULL")
        .bind(&normalized)
        .execute(pool)
        .await?;

    let code = generate_access_code();
    let code_hash = hash_secret(&code);

    sqlx::query("INSERT INTO login_codes (email, code_hash) VALUES ($1, $2)")
        .bind(&normalized)
        .bind(code_hash)
        .execute(pool)
        .await?;

    Ok(code)
}

/// Verify a submitted code and return the owning user's id.
///
/// A wrong guess bumps the attempt counter on the live code and burns it
/// after `MAX_FAILED_ATTEMPTS`, so codes cannot be brute-forced.
pub async fn verify_access_code(pool: &PgPool, email: &str, code: &str) -> Result<Uuid, EmailAuthError> {
    let normalized_email = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    let normalized_code = normalize_code(code).ok_or(EmailAuthError::InvalidCode)?;
    let code_hash = hash_secret(&normalized_code);

    let update = sqlx::query(
        r"UPDATE login_codes
          SET consumed_at = now()
          WHERE id = (
              SELECT id
              FROM login_codes
              WHERE email = $1
                AND consumed_at IS NULL
                AND expires_at > now()
              ORDER BY created_at DESC
              LIMIT 1
          )
          AND code_hash = $2
          RETURNING id",
    )
    .bind(&normalized_email)
    .bind(&code_hash)
    .fetch_optional(pool)
    .await?;

    if update.is_none() {
        sqlx::query(
            r"UPDATE login_codes
              SET attempts = attempts + 1,
                  consumed_at = CASE WHEN attempts + 1 >= $2 THEN now() ELSE consumed_at END
              WHERE id = (
                  SELECT id
                  FROM login_codes
                  WHERE email = $1
                    AND consumed_at IS NULL
                    AND expires_at > now()
                  ORDER BY created_at DESC
                  LIMIT 1
              )",
        )
        .bind(&normalized_email)
        .bind(MAX_FAILED_ATTEMPTS)
        .execute(pool)
        .await?;
        return Err(EmailAuthError::VerificationFailed);
    }

    let user_row = sqlx::query("SELECT id FROM users WHERE email = $1")
        .bind(&normalized_email)
        .fetch_optional(pool)
        .await?;

    let Some(user_row) = user_row else {
        return Err(EmailAuthError::VerificationFailed);
    };

    Ok(user_row.get("id"))
}

// =============================================================================
// ONE-TIME LINK TOKENS
// =============================================================================

/// What a login link is for. Stored as text alongside the token hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPurpose {
    Login,
    Reset,
}

impl LinkPurpose {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Reset => "reset",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "login" => Some(Self::Login),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

#[must_use]
pub fn generate_link_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Create a one-time link token for an email, invalidating prior unconsumed
/// tokens with the same purpose. Returns the plain token for the URL.
pub async fn request_link_token(
    pool: &PgPool,
    email: &str,
    purpose: LinkPurpose,
) -> Result<String, EmailAuthError> {
    let normalized = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    ensure_user(pool, &normalized).await?;

    sqlx::query("DELETE FROM login_tokens WHERE email = $1 AND purpose = $2 AND consumed_at IS NULL")
        .bind(&normalized)
        .bind(purpose.as_str())
        .execute(pool)
        .await?;

    let token = generate_link_token();
    sqlx::query("INSERT INTO login_tokens (token_hash, email, purpose) VALUES ($1, $2, $3)")
        .bind(hash_secret(&token))
        .bind(&normalized)
        .bind(purpose.as_str())
        .execute(pool)
        .await?;

    Ok(token)
}

/// Consume a link token. Single use: the row is marked consumed in the same
/// statement that matches it, so a replayed link gets `None`.
pub async fn consume_link_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<(String, LinkPurpose)>, EmailAuthError> {
    let row = sqlx::query(
        r"UPDATE login_tokens
          SET consumed_at = now()
          WHERE token_hash = $1
            AND consumed_at IS NULL
            AND expires_at > now()
          RETURNING email, purpose",
    )
    .bind(hash_secret(token))
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(|r| {
        let email: String = r.get("email");
        let purpose: String = r.get("purpose");
        LinkPurpose::parse(&purpose).map(|p| (email, p))
    }))
}

#[cfg(test)]
#[path = "email_auth_test.rs"]
mod tests;
