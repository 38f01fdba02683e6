pub mod allowlist;
pub mod email_auth;
pub mod mailer;
pub mod roles;
pub mod session;
