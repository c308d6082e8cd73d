//! Route table and access guards.
//!
//! ARCHITECTURE
//! ============
//! Routing is a pure function from `(path, session)` to an [`Outcome`]: the
//! HTTP layer interprets `Render`/`Redirect`/`NotFound` uniformly instead of
//! guards performing navigation side effects themselves. Paths are matched
//! exactly; anything outside the table falls through to `NotFound`.
//!
//! TRADE-OFFS
//! ==========
//! Guard decisions are synchronous reads of the session snapshot. The
//! authentication check always runs before the role check, so an anonymous
//! request for an admin page lands on the login view, never the landing
//! page.

use crate::services::session::{Role, User};

pub const LOGIN_PATH: &str = "/login";
/// Default route for authenticated users arriving at `/` or `/login`.
pub const LANDING_PATH: &str = "/dashboard";

// =============================================================================
// VIEWS
// =============================================================================

/// The page shells this layer can hand back. Page content itself is out of
/// scope; the shell only decides which one is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Leads,
    Pipeline,
    Customers,
    Reports,
    Callers,
    Settings,
    NotFound,
}

impl View {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Sign in",
            View::Dashboard => "Dashboard",
            View::Leads => "Leads",
            View::Pipeline => "Pipeline",
            View::Customers => "Customers",
            View::Reports => "Reports",
            View::Callers => "Callers",
            View::Settings => "Settings",
            View::NotFound => "Page not found",
        }
    }
}

// =============================================================================
// GUARDS
// =============================================================================

/// Access requirement on a protected route. Both variants share one
/// decision contract: `check` yields the redirect target that applies, or
/// `None` when access is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Authenticated,
    AdminOnly,
}

impl Guard {
    /// The authentication check strictly precedes the role check.
    fn check(self, session: Option<&User>) -> Option<&'static str> {
        let Some(user) = session else {
            return Some(LOGIN_PATH);
        };
        match self {
            Guard::Authenticated => None,
            Guard::AdminOnly if user.role == Role::Admin => None,
            Guard::AdminOnly => Some(LANDING_PATH),
        }
    }
}

// =============================================================================
// ROUTE TABLE
// =============================================================================

/// What the shell should do with a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Render(View),
    /// Clients apply redirects with history replacement so the blocked
    /// attempt never lands in back-history.
    Redirect(&'static str),
    NotFound,
}

const PROTECTED: &[(&str, Guard, View)] = &[
    ("/dashboard", Guard::Authenticated, View::Dashboard),
    ("/leads", Guard::Authenticated, View::Leads),
    ("/pipeline", Guard::Authenticated, View::Pipeline),
    ("/customers", Guard::Authenticated, View::Customers),
    ("/reports", Guard::Authenticated, View::Reports),
    ("/callers", Guard::AdminOnly, View::Callers),
    ("/settings", Guard::AdminOnly, View::Settings),
];

/// Resolve a request path against the route table. First match wins.
#[must_use]
pub fn resolve(path: &str, session: Option<&User>) -> Outcome {
    if path == LOGIN_PATH {
        return if session.is_some() {
            Outcome::Redirect(LANDING_PATH)
        } else {
            Outcome::Render(View::Login)
        };
    }

    if path == "/" {
        return if session.is_some() {
            Outcome::Redirect(LANDING_PATH)
        } else {
            Outcome::Redirect(LOGIN_PATH)
        };
    }

    for (route, guard, view) in PROTECTED {
        if *route == path {
            return match guard.check(session) {
                Some(target) => Outcome::Redirect(target),
                None => Outcome::Render(*view),
            };
        }
    }

    Outcome::NotFound
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
