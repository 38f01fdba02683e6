use futures::executor::block_on;

use super::*;

// =============================================================================
// State machine: begin / settle
// =============================================================================

#[test]
fn first_begin_claims_the_attempt() {
    let cell = LoaderCell::new();
    assert!(matches!(cell.begin(), Begin::Start));
    assert_eq!(cell.phase(), LoadPhase::Loading);
}

#[test]
fn concurrent_callers_wait_on_the_same_attempt() {
    let cell = LoaderCell::new();
    let Begin::Start = cell.begin() else { panic!("expected Start") };

    // Every racer while loading gets a waiter, never a second Start.
    let Begin::Wait(rx_a) = cell.begin() else { panic!("expected Wait") };
    let Begin::Wait(rx_b) = cell.begin() else { panic!("expected Wait") };
    let Begin::Wait(rx_c) = cell.begin() else { panic!("expected Wait") };

    cell.settle(&Ok(()));

    assert_eq!(cell.phase(), LoadPhase::Loaded);
    for rx in [rx_a, rx_b, rx_c] {
        assert_eq!(block_on(rx).unwrap(), Ok(()));
    }
}

#[test]
fn all_waiters_observe_the_same_failure() {
    let cell = LoaderCell::new();
    let Begin::Start = cell.begin() else { panic!("expected Start") };
    let Begin::Wait(rx) = cell.begin() else { panic!("expected Wait") };

    cell.settle(&Err("blocked by the network".to_owned()));

    assert_eq!(block_on(rx).unwrap(), Err("blocked by the network".to_owned()));
}

#[test]
fn failure_returns_to_unloaded_for_retry() {
    let cell = LoaderCell::new();
    let Begin::Start = cell.begin() else { panic!("expected Start") };
    cell.settle(&Err("nope".to_owned()));

    assert_eq!(cell.phase(), LoadPhase::Unloaded);
    assert!(matches!(cell.begin(), Begin::Start));
}

#[test]
fn loaded_never_transitions_backward() {
    let cell = LoaderCell::new();
    let Begin::Start = cell.begin() else { panic!("expected Start") };
    cell.settle(&Ok(()));

    assert!(matches!(cell.begin(), Begin::Ready));
    assert!(matches!(cell.begin(), Begin::Ready));
    assert_eq!(cell.phase(), LoadPhase::Loaded);
}

#[test]
fn dropped_waiter_does_not_poison_settling() {
    let cell = LoaderCell::new();
    let Begin::Start = cell.begin() else { panic!("expected Start") };
    let Begin::Wait(rx) = cell.begin() else { panic!("expected Wait") };
    drop(rx);

    cell.settle(&Ok(()));
    assert_eq!(cell.phase(), LoadPhase::Loaded);
}

// =============================================================================
// load_once
// =============================================================================

#[test]
fn load_once_runs_start_exactly_once() {
    let cell = LoaderCell::new();
    let mut runs = 0;

    let first = block_on(load_once(&cell, || {
        runs += 1;
        async { Ok(()) }
    }));
    let second = block_on(load_once(&cell, || {
        runs += 1;
        async { Ok(()) }
    }));

    assert_eq!(first, Ok(()));
    assert_eq!(second, Ok(()));
    assert_eq!(runs, 1);
}

#[test]
fn load_once_failure_then_retry_succeeds() {
    let cell = LoaderCell::new();

    let first = block_on(load_once(&cell, || async { Err("offline".to_owned()) }));
    assert_eq!(first, Err("offline".to_owned()));
    assert_eq!(cell.phase(), LoadPhase::Unloaded);

    let second = block_on(load_once(&cell, || async { Ok(()) }));
    assert_eq!(second, Ok(()));
    assert_eq!(cell.phase(), LoadPhase::Loaded);
}

#[test]
fn waiter_sees_error_when_attempt_owner_disappears() {
    let cell = LoaderCell::new();
    let Begin::Start = cell.begin() else { panic!("expected Start") };
    let Begin::Wait(rx) = cell.begin() else { panic!("expected Wait") };

    // Owner vanishes without settling: the waiter's channel is dropped and
    // load_once's recovery path maps that to an error string.
    let result = block_on(async move {
        drop(cell);
        rx.await
            .unwrap_or_else(|_| Err("load attempt dropped before settling".to_owned()))
    });
    assert_eq!(result, Err("load attempt dropped before settling".to_owned()));
}
