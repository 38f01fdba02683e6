use super::*;

#[test]
fn bytes_to_hex_formats_lowercase_pairs() {
    assert_eq!(bytes_to_hex(&[0x00, 0xff, 0x0a]), "00ff0a");
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_is_unique_enough() {
    assert_ne!(generate_token(), generate_token());
}

#[test]
fn expires_at_formats_rfc3339() {
    let session = ValidatedSession {
        user: SessionUser {
            id: Uuid::nil(),
            email: "owner@example.com".to_owned(),
            name: "owner".to_owned(),
        },
        expires_at: OffsetDateTime::UNIX_EPOCH,
    };
    assert_eq!(session.expires_at_rfc3339().as_deref(), Some("1970-01-01T00:00:00Z"));
}
