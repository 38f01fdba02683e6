#![cfg(not(feature = "hydrate"))]

use leptos::prelude::Owner;

use super::*;

// =============================================================================
// Parsing and serialization
// =============================================================================

#[test]
fn parse_round_trips_both_decisions() {
    for flag in [ConsentFlag::Accepted, ConsentFlag::Declined] {
        assert_eq!(ConsentFlag::parse(flag.as_str()), Some(flag));
    }
}

#[test]
fn parse_treats_garbage_as_undecided() {
    assert_eq!(ConsentFlag::parse(""), None);
    assert_eq!(ConsentFlag::parse("yes"), None);
    assert_eq!(ConsentFlag::parse("ACCEPTED"), None);
}

// =============================================================================
// Gating semantics
// =============================================================================

#[test]
fn only_acceptance_unlocks_loaders() {
    assert!(unlocks_loaders(Some(ConsentFlag::Accepted)));
    assert!(!unlocks_loaders(Some(ConsentFlag::Declined)));
    assert!(!unlocks_loaders(None));
}

#[test]
fn undecided_prompts_but_either_decision_suppresses() {
    assert!(should_prompt(None));
    assert!(!should_prompt(Some(ConsentFlag::Accepted)));
    assert!(!should_prompt(Some(ConsentFlag::Declined)));
}

// =============================================================================
// Signal behavior (storage is a no-op off the browser)
// =============================================================================

#[test]
fn record_updates_signal_immediately() {
    let _owner = Owner::new();
    _owner.set();
    let consent = ConsentSignal::install();
    assert_eq!(consent.current(), None);

    consent.record(ConsentFlag::Accepted);
    assert_eq!(consent.current(), Some(ConsentFlag::Accepted));
    assert!(unlocks_loaders(consent.current()));
}

#[test]
fn decline_suppresses_without_unlocking() {
    let _owner = Owner::new();
    _owner.set();
    let consent = ConsentSignal::install();
    consent.record(ConsentFlag::Declined);

    assert!(!should_prompt(consent.current()));
    assert!(!unlocks_loaders(consent.current()));
}

#[test]
fn clear_returns_to_undecided() {
    let _owner = Owner::new();
    _owner.set();
    let consent = ConsentSignal::install();
    consent.record(ConsentFlag::Accepted);
    consent.clear();

    assert_eq!(consent.current(), None);
    assert!(should_prompt(consent.current()));
}
