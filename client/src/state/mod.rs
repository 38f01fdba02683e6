//! Client-side state: auth events, session store, role cache.
//!
//! SYSTEM CONTEXT
//! ==============
//! These modules are installed once at app startup and shared via context,
//! so tests can construct fresh instances instead of fighting globals.

pub mod events;
pub mod roles;
pub mod session;
