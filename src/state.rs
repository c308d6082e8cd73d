//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! is the only way to reach the auth gate or the sidebar flag — both are
//! constructed exactly once in `main` and threaded through here. A handler
//! that needs either cannot be wired up without them, which is what keeps
//! "provider missing" a construction-time error instead of a silent
//! logged-out default.

use std::sync::Arc;

use crate::gate::AuthGate;
use crate::services::sidebar::Sidebar;

/// Shared application state. Clone is required by Axum — both fields are
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AuthGate>,
    pub sidebar: Arc<Sidebar>,
}

impl AppState {
    #[must_use]
    pub fn new(gate: AuthGate, sidebar: Sidebar) -> Self {
        Self { gate: Arc::new(gate), sidebar: Arc::new(sidebar) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
