use super::*;

#[test]
fn parse_splits_and_normalizes() {
    let list = Allowlist::parse(" Owner@Example.com , ops@example.com ");
    assert!(list.is_allowed("owner@example.com"));
    assert!(list.is_allowed("ops@example.com"));
    assert!(!list.is_allowed("stranger@example.com"));
}

#[test]
fn parse_drops_invalid_entries() {
    let list = Allowlist::parse("not-an-email,,owner@example.com");
    assert!(list.is_allowed("owner@example.com"));
    assert!(!list.is_allowed("not-an-email"));
}

#[test]
fn empty_list_allows_nobody() {
    let list = Allowlist::parse("");
    assert!(list.is_empty());
    assert!(!list.is_allowed("owner@example.com"));
}

#[test]
fn comparison_is_exact_after_normalization() {
    let list = Allowlist::parse("owner@example.com");
    // Callers normalize before checking; raw-cased input does not match.
    assert!(!list.is_allowed("Owner@Example.com"));
}
