use futures::executor::block_on;
use uuid::Uuid;

use super::*;

const T0: f64 = 1_000_000.0;

// =============================================================================
// RoleGrant freshness
// =============================================================================

#[test]
fn grant_is_fresh_inside_window() {
    let grant = RoleGrant { granted: true, fetched_at_ms: T0 };
    assert!(grant.is_fresh(T0));
    assert!(grant.is_fresh(T0 + FRESHNESS_WINDOW_MS - 1.0));
}

#[test]
fn grant_is_stale_at_window_edge() {
    let grant = RoleGrant { granted: true, fetched_at_ms: T0 };
    assert!(!grant.is_fresh(T0 + FRESHNESS_WINDOW_MS));
}

// =============================================================================
// Cache lookup
// =============================================================================

#[test]
fn lookup_misses_on_empty_cache() {
    let resolver = RoleResolver::new();
    assert_eq!(resolver.lookup(Uuid::nil(), "admin", T0), CacheLookup::Miss);
}

#[test]
fn fresh_entry_short_circuits() {
    let resolver = RoleResolver::new();
    let user = Uuid::new_v4();
    resolver.insert(user, "admin", true, T0);

    assert_eq!(resolver.lookup(user, "admin", T0 + 1.0), CacheLookup::Fresh(true));
}

#[test]
fn stale_entry_is_a_miss() {
    let resolver = RoleResolver::new();
    let user = Uuid::new_v4();
    resolver.insert(user, "admin", true, T0);

    assert_eq!(resolver.lookup(user, "admin", T0 + FRESHNESS_WINDOW_MS), CacheLookup::Miss);
}

#[test]
fn grants_are_never_shared_across_users() {
    let resolver = RoleResolver::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    resolver.insert(alice, "admin", true, T0);

    assert_eq!(resolver.lookup(bob, "admin", T0), CacheLookup::Miss);
}

#[test]
fn grants_are_keyed_by_role_name() {
    let resolver = RoleResolver::new();
    let user = Uuid::new_v4();
    resolver.insert(user, "admin", true, T0);

    assert_eq!(resolver.lookup(user, "editor", T0), CacheLookup::Miss);
}

#[test]
fn evict_all_forgets_everything() {
    let resolver = RoleResolver::new();
    let user = Uuid::new_v4();
    resolver.insert(user, "admin", true, T0);

    resolver.evict_all();

    assert_eq!(resolver.lookup(user, "admin", T0), CacheLookup::Miss);
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolve_without_user_is_false_without_network() {
    // No user id: answer is immediate; any network attempt would hit the
    // non-hydrate stub and error, but resolve must return before that path.
    let resolver = RoleResolver::new();
    assert!(!block_on(resolver.resolve(None, "admin")));
}

#[test]
fn resolve_with_fresh_cache_skips_network() {
    // The non-hydrate `has_role` stub always errors, so a `true` answer can
    // only have come from the cache.
    let resolver = RoleResolver::new();
    let user = Uuid::new_v4();
    resolver.insert(user, "admin", true, now_ms());

    assert!(block_on(resolver.resolve(Some(user), "admin")));
}

#[test]
fn resolve_fails_closed_when_remote_errors() {
    // Cache miss + erroring stub: must resolve to false, not propagate.
    let resolver = RoleResolver::new();
    assert!(!block_on(resolver.resolve(Some(Uuid::new_v4()), "admin")));
}

// =============================================================================
// RoleCheck
// =============================================================================

#[test]
fn role_check_constructors() {
    assert_eq!(RoleCheck::pending(), RoleCheck { granted: false, loading: true });
    assert_eq!(RoleCheck::resolved(true), RoleCheck { granted: true, loading: false });
    assert_eq!(RoleCheck::denied(), RoleCheck { granted: false, loading: false });
}
