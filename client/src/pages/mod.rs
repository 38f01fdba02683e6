//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates shared chrome to
//! `components::site_shell`. Marketing pages are static content; `login` and
//! `admin` carry the auth flows.

pub mod admin;
pub mod home;
pub mod industries;
pub mod locations;
pub mod login;
pub mod portfolio;
pub mod pricing;
