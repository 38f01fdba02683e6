use super::*;

#[test]
fn render_login_code_injects_email_and_code() {
    let html = render_login_code("owner@example.com", "ABC234");
    assert!(html.contains("owner@example.com"));
    assert!(html.contains("ABC234"));
    assert!(!html.contains("{{EMAIL}}"));
    assert!(!html.contains("{{CODE}}"));
}

#[test]
fn render_login_link_injects_url() {
    let html = render_login_link("https://example.com/api/auth/callback?token=abc");
    assert!(html.contains("https://example.com/api/auth/callback?token=abc"));
    assert!(!html.contains("{{LINK}}"));
}

#[test]
fn render_reset_link_injects_url() {
    let html = render_reset_link("https://example.com/api/auth/callback?token=xyz");
    assert!(html.contains("token=xyz"));
    assert!(!html.contains("{{LINK}}"));
}

#[test]
fn config_exposes_from_address() {
    let config = MailerConfig::new("re_test_key".to_owned(), "Mainstreet <hello@mainstreet.example>".to_owned());
    assert_eq!(config.from_addr(), "Mainstreet <hello@mainstreet.example>");
}
