//! Outbound email via Resend.
//!
//! Templates are compiled into the binary and filled with simple placeholder
//! substitution. Configuration is optional: without `RESEND_API_KEY` and
//! `RESEND_FROM` the dispatch endpoints report delivery as unavailable.

use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

const LOGIN_CODE_TEMPLATE: &str = include_str!("../../templates/login_code.html");
const LOGIN_LINK_TEMPLATE: &str = include_str!("../../templates/login_link.html");
const RESET_LINK_TEMPLATE: &str = include_str!("../../templates/reset_link.html");

#[derive(Debug, thiserror::Error)]
#[error("email delivery failed: {0}")]
pub struct DeliveryError(pub String);

#[derive(Debug, Clone)]
pub struct MailerConfig {
    api_key: String,
    from: String,
}

impl MailerConfig {
    #[must_use]
    pub fn new(api_key: String, from: String) -> Self {
        Self { api_key, from }
    }

    /// Read `RESEND_API_KEY` and `RESEND_FROM`. Both must be present.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("RESEND_API_KEY").ok().filter(|v| !v.trim().is_empty())?;
        let from = std::env::var("RESEND_FROM").ok().filter(|v| !v.trim().is_empty())?;
        Some(Self::new(api_key, from))
    }

    #[must_use]
    pub fn from_addr(&self) -> &str {
        &self.from
    }
}

async fn send(config: &MailerConfig, to_email: &str, subject: &str, html: &str) -> Result<(), DeliveryError> {
    let resend = Resend::new(&config.api_key);
    let to = [to_email];
    let email = CreateEmailBaseOptions::new(&config.from, to, subject).with_html(html);
    resend
        .emails
        .send(email)
        .await
        .map_err(|e| DeliveryError(e.to_string()))?;
    Ok(())
}

pub async fn send_login_code(config: &MailerConfig, to_email: &str, code: &str) -> Result<(), DeliveryError> {
    let html = render_login_code(to_email, code);
    send(config, to_email, "Your Mainstreet Studio sign-in code", &html).await
}

pub async fn send_login_link(config: &MailerConfig, to_email: &str, link: &str) -> Result<(), DeliveryError> {
    let html = render_login_link(link);
    send(config, to_email, "Your Mainstreet Studio sign-in link", &html).await
}

pub async fn send_reset_link(config: &MailerConfig, to_email: &str, link: &str) -> Result<(), DeliveryError> {
    let html = render_reset_link(link);
    send(config, to_email, "Reset your Mainstreet Studio access", &html).await
}

#[must_use]
pub fn render_login_code(email: &str, code: &str) -> String {
    LOGIN_CODE_TEMPLATE
        .replace("{{EMAIL}}", email)
        .replace("{{CODE}}", code)
}

#[must_use]
pub fn render_login_link(link: &str) -> String {
    LOGIN_LINK_TEMPLATE.replace("{{LINK}}", link)
}

#[must_use]
pub fn render_reset_link(link: &str) -> String {
    RESET_LINK_TEMPLATE.replace("{{LINK}}", link)
}

#[cfg(test)]
#[path = "mailer_test.rs"]
mod tests;
