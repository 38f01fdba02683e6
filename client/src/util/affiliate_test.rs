use super::*;

// =============================================================================
// sanitize_ref
// =============================================================================

#[test]
fn sanitize_strips_disallowed_characters() {
    assert_eq!(sanitize_ref("Partner-123!!!"), Some("Partner-123".to_owned()));
    assert_eq!(sanitize_ref("a b\tc"), Some("abc".to_owned()));
    assert_eq!(sanitize_ref("under_score-ok"), Some("under_score-ok".to_owned()));
}

#[test]
fn sanitize_rejects_when_nothing_remains() {
    assert_eq!(sanitize_ref(""), None);
    assert_eq!(sanitize_ref("!!!"), None);
    assert_eq!(sanitize_ref("<script>"), Some("script".to_owned()));
}

#[test]
fn sanitize_bounds_length() {
    let long = "a".repeat(200);
    assert_eq!(sanitize_ref(&long).unwrap().len(), REF_MAX_LEN);
}

// =============================================================================
// ref_from_query
// =============================================================================

#[test]
fn finds_ref_among_other_parameters() {
    assert_eq!(ref_from_query("?utm=x&ref=Partner-123&b=1"), Some("Partner-123".to_owned()));
    assert_eq!(ref_from_query("ref=solo"), Some("solo".to_owned()));
}

#[test]
fn empty_or_absent_ref_is_none() {
    assert_eq!(ref_from_query("?ref="), None);
    assert_eq!(ref_from_query("?utm=x"), None);
    assert_eq!(ref_from_query(""), None);
}

#[test]
fn does_not_match_prefixed_parameter_names() {
    assert_eq!(ref_from_query("?refresh=1"), None);
}

#[test]
fn percent_encoded_value_is_decoded() {
    assert_eq!(ref_from_query("?ref=Partner%2D123"), Some("Partner-123".to_owned()));
    assert_eq!(ref_from_query("?ref=a%5Fb"), Some("a_b".to_owned()));
}

#[test]
fn malformed_percent_sequences_pass_through_raw() {
    assert_eq!(ref_from_query("?ref=50%25off"), Some("50%off".to_owned()));
    assert_eq!(ref_from_query("?ref=%%%"), Some("%%%".to_owned()));
}

// =============================================================================
// capture_from_query
// =============================================================================

#[test]
fn capture_stores_sanitized_value() {
    assert_eq!(capture_from_query("?ref=Partner-123!!!"), Capture::Store("Partner-123".to_owned()));
}

#[test]
fn capture_skips_when_no_parameter() {
    assert_eq!(capture_from_query(""), Capture::Skip);
    assert_eq!(capture_from_query("?ref="), Capture::Skip);
}

#[test]
fn capture_rejects_fully_unsafe_values() {
    assert_eq!(capture_from_query("?ref=!!!"), Capture::Rejected);
    assert_eq!(capture_from_query("?ref=%%%"), Capture::Rejected);
    // Decodes to "!!!", then nothing safe remains.
    assert_eq!(capture_from_query("?ref=%21%21%21"), Capture::Rejected);
}

#[test]
fn capture_stores_decoded_then_sanitized_value() {
    assert_eq!(capture_from_query("?ref=Partner%2D123"), Capture::Store("Partner-123".to_owned()));
}

#[test]
fn repeated_capture_of_same_value_is_stable() {
    let first = capture_from_query("?ref=Partner-123");
    let second = capture_from_query("?ref=Partner-123");
    assert_eq!(first, second);
}

// =============================================================================
// Cookie shape
// =============================================================================

#[test]
fn cookie_has_ninety_day_expiry_and_scoping() {
    let cookie = cookie_string("Partner-123");
    assert!(cookie.starts_with("ms_ref=Partner-123; "));
    assert!(cookie.contains("Max-Age=7776000"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Secure"));
}

#[test]
fn stored_value_is_found_among_other_cookies() {
    let header = "theme=dark; ms_ref=Partner-123; session_token=abc";
    assert_eq!(ref_from_cookies(header), Some("Partner-123".to_owned()));
}

#[test]
fn missing_or_empty_cookie_reads_as_none() {
    assert_eq!(ref_from_cookies(""), None);
    assert_eq!(ref_from_cookies("theme=dark"), None);
    assert_eq!(ref_from_cookies("ms_ref="), None);
    assert_eq!(ref_from_cookies("garbage"), None);
}
