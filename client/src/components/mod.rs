//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome and the guarded/consent-gated surfaces while
//! reading shared state from Leptos context providers.

pub mod admin_gate;
pub mod chat_launcher;
pub mod consent_banner;
pub mod site_shell;
