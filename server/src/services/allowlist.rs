//! Recipient allow-list for email dispatch.
//!
//! Login emails are only sent to addresses named in `ADMIN_EMAILS`. Anything
//! else is refused before a code or token is ever created, so the endpoints
//! cannot be used to spam arbitrary inboxes.

use crate::services::email_auth::normalize_email;

#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    emails: Vec<String>,
}

impl Allowlist {
    /// Parse a comma-separated list of addresses. Entries are normalized the
    /// same way inbound requests are, so comparisons are exact.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let emails = raw
            .split(',')
            .filter_map(normalize_email)
            .collect::<Vec<_>>();
        Self { emails }
    }

    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("ADMIN_EMAILS")
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Check a normalized email against the list.
    #[must_use]
    pub fn is_allowed(&self, normalized_email: &str) -> bool {
        self.emails.iter().any(|e| e == normalized_email)
    }
}

#[cfg(test)]
#[path = "allowlist_test.rs"]
mod tests;
