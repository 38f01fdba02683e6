use super::*;

#[test]
fn return_target_defaults_to_admin() {
    assert_eq!(return_target(None), "/admin");
    assert_eq!(return_target(Some("")), "/admin");
}

#[test]
fn return_target_honors_internal_paths() {
    assert_eq!(return_target(Some("/admin/widgets")), "/admin/widgets");
}

#[test]
fn return_target_rejects_external_targets() {
    assert_eq!(return_target(Some("https://evil.example")), "/admin");
    assert_eq!(return_target(Some("//evil.example")), "/admin");
}
