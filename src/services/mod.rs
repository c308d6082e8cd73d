//! Domain services used by the gate and HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own credential exchange, session persistence, and UI
//! chrome state so route handlers can stay focused on protocol translation.

pub mod auth;
pub mod session;
pub mod sidebar;
