//! Auth gate — the single owner of session state.
//!
//! ARCHITECTURE
//! ============
//! `AuthGate` holds the in-memory `User` and writes every mutation through
//! `SessionStore` before the memory copy changes, so the durable slot and
//! memory never diverge. It is constructed once at startup (restoring any
//! persisted session) and handed to routes via `AppState`; there is no
//! global lookup.
//!
//! TRADE-OFFS
//! ==========
//! `login` reports only success or failure. Callers that need to know why a
//! login failed must watch the logs; the narrow channel keeps the UI from
//! branching on backend error detail. A second login while one is in flight
//! is rejected outright rather than queued.

use std::sync::{Arc, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::services::auth::{AuthError, Authenticator};
use crate::services::session::{Role, SessionStore, User};

pub struct AuthGate {
    authenticator: Arc<dyn Authenticator>,
    store: SessionStore,
    /// `Some` if and only if a user is authenticated. No await is ever held
    /// under this lock, so a std lock suffices.
    user: RwLock<Option<User>>,
    login_in_flight: AtomicBool,
}

/// Clears the in-flight latch when the login attempt finishes, on every
/// exit path.
struct InFlightReset<'a>(&'a AtomicBool);

impl Drop for InFlightReset<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AuthGate {
    /// Build the gate, restoring any persisted session from the store.
    #[must_use]
    pub fn new(store: SessionStore, authenticator: Arc<dyn Authenticator>) -> Self {
        let user = store.restore();
        if let Some(restored) = &user {
            tracing::info!(user_id = %restored.id, "session restored from durable slot");
        }
        Self {
            authenticator,
            store,
            user: RwLock::new(user),
            login_in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_some()
    }

    /// Exchange credentials for a session. Returns `true` on success.
    ///
    /// On any backend failure the gate state is untouched and `false` comes
    /// back; detail goes to the log only. The `role` argument does not
    /// override the backend's role — it only decides whether the session is
    /// caller-scoped (`caller_id` mirrors the backend id when the caller
    /// asked for a caller session).
    pub async fn login(&self, email: &str, password: &str, role: Role) -> bool {
        if self.login_in_flight.swap(true, Ordering::AcqRel) {
            tracing::warn!("login already in flight, rejecting concurrent attempt");
            return false;
        }
        let _reset = InFlightReset(&self.login_in_flight);

        let reply = match self.authenticator.login(email, password).await {
            Ok(reply) => reply,
            Err(AuthError::Rejected(detail)) => {
                tracing::warn!(%email, %detail, "login rejected");
                return false;
            }
            Err(AuthError::Transport(detail)) => {
                tracing::error!(%email, %detail, "login transport failure");
                return false;
            }
        };

        let caller_id = (role == Role::Caller).then(|| reply.id.clone());
        let user = User {
            id: reply.id,
            name: reply.name,
            email: reply.email,
            role: reply.role,
            avatar: None,
            caller_id,
        };

        // Write through: slot first, memory second, under one lock so no
        // reader observes a half-applied login.
        let mut current = self
            .user
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Err(e) = self.store.persist(&user) {
            tracing::error!(error = %e, "session persist failed, login aborted");
            return false;
        }
        *current = Some(user);
        true
    }

    /// Drop the session: durable slot and memory are cleared together.
    /// Calling this while already logged out is a no-op.
    pub fn logout(&self) {
        let mut current = self
            .user
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Err(e) = self.store.clear() {
            // Memory is still cleared; worst case the stale slot is restored
            // at next startup and the user logs out again.
            tracing::error!(error = %e, "session slot clear failed");
        }
        *current = None;
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
