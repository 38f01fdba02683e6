//! Mainstreet Studio marketing site - Leptos client.
//!
//! Compiled two ways: to WASM with the `hydrate` feature for the browser,
//! and natively with the `ssr` feature for server rendering. Browser-only
//! behavior (storage, cookies, script tags) is feature-gated so the native
//! build stays deterministic.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point, invoked from the generated JS glue.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
