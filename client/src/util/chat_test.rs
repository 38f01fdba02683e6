use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use super::*;
use crate::util::loader::LoadPhase;

// =============================================================================
// Probe chain ordering
// =============================================================================

struct RecordingProbe<'a> {
    name: &'a str,
    handles: bool,
    log: &'a Mutex<Vec<String>>,
}

impl WidgetProbe for RecordingProbe<'_> {
    fn try_toggle(&self) -> bool {
        self.log.lock().unwrap().push(self.name.to_owned());
        self.handles
    }
}

#[test]
fn probes_run_in_order_and_stop_at_first_success() {
    let log = Mutex::new(Vec::new());
    let primary = RecordingProbe { name: "primary", handles: false, log: &log };
    let widget = RecordingProbe { name: "widget", handles: true, log: &log };
    let legacy = RecordingProbe { name: "legacy", handles: true, log: &log };

    assert!(toggle_with(&[&primary, &widget, &legacy]));
    assert_eq!(*log.lock().unwrap(), vec!["primary", "widget"]);
}

#[test]
fn first_probe_success_short_circuits_the_rest() {
    let log = Mutex::new(Vec::new());
    let primary = RecordingProbe { name: "primary", handles: true, log: &log };
    let widget = RecordingProbe { name: "widget", handles: true, log: &log };

    assert!(toggle_with(&[&primary, &widget]));
    assert_eq!(*log.lock().unwrap(), vec!["primary"]);
}

#[test]
fn no_capable_probe_is_a_silent_noop() {
    let log = Mutex::new(Vec::new());
    let primary = RecordingProbe { name: "primary", handles: false, log: &log };
    let legacy = RecordingProbe { name: "legacy", handles: false, log: &log };

    assert!(!toggle_with(&[&primary, &legacy]));
    assert_eq!(*log.lock().unwrap(), vec!["primary", "legacy"]);
}

#[test]
fn empty_probe_list_is_a_noop() {
    assert!(!toggle_with(&[]));
}

// =============================================================================
// Script URL / configuration
// =============================================================================

#[test]
fn script_url_embeds_widget_id() {
    assert_eq!(widget_script_url("site-42"), "https://widget.chatlet.io/loader/site-42.js");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn widget_id_is_unconfigured_off_browser() {
    assert!(configured_widget_id().is_none());
}

// =============================================================================
// ensure_widget
// =============================================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn ensure_widget_without_id_errs_and_never_starts_loading() {
    let loader = ChatLoader::new();
    let result = block_on(ensure_widget(&loader));

    assert!(result.is_err());
    assert_eq!(loader.0.phase(), LoadPhase::Unloaded);
}

#[test]
fn repeated_mounts_share_one_loader_cell() {
    let loader = ChatLoader::new();
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        let _ = block_on(crate::util::loader::load_once(&loader.0, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        }));
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(loader.0.phase(), LoadPhase::Loaded);
}
