//! Networking modules for the HTTP API boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls against the server; `types` defines the shared
//! wire schema view.

pub mod api;
pub mod types;
