//! Sidebar collapse flag — process-local UI chrome state.
//!
//! Deliberately not persisted: every fresh start opens with the sidebar
//! expanded. Independent of the session; layout chrome is its only consumer.

use std::sync::atomic::{AtomicBool, Ordering};

/// Collapse state of the navigation sidebar. Default is expanded.
pub struct Sidebar {
    collapsed: AtomicBool,
}

impl Sidebar {
    #[must_use]
    pub fn new() -> Self {
        Self { collapsed: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn collapsed(&self) -> bool {
        self.collapsed.load(Ordering::Acquire)
    }

    pub fn set_collapsed(&self, value: bool) {
        self.collapsed.store(value, Ordering::Release);
    }

    /// Flip the collapse state, returning the new value.
    pub fn toggle(&self) -> bool {
        // fetch_xor returns the previous value; the new one is its negation.
        !self.collapsed.fetch_xor(true, Ordering::AcqRel)
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod tests;
