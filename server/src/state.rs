//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool, the optional mailer configuration, and the
//! dispatch allow-list. All fields are cheap to clone; the pool is an Arc
//! internally.

use sqlx::PgPool;

use crate::services::allowlist::Allowlist;
use crate::services::mailer::MailerConfig;

#[derive(Clone)]
pub struct AppState {
    /// Shared `PostgreSQL` connection pool.
    pub pool: PgPool,
    /// Resend credentials, or `None` when email dispatch is unconfigured.
    pub mailer: Option<MailerConfig>,
    /// Recipients allowed to request login emails.
    pub allowlist: Allowlist,
    /// Public origin used when building login-link URLs.
    pub base_url: String,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, mailer: Option<MailerConfig>, allowlist: Allowlist) -> Self {
        let base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_owned())
            .trim_end_matches('/')
            .to_owned();
        Self { pool, mailer, allowlist, base_url }
    }
}
