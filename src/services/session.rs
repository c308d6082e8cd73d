//! Session records and durable persistence.
//!
//! ARCHITECTURE
//! ============
//! The authenticated user lives in two places that must never diverge: the
//! in-memory copy owned by the auth gate and a durable key-value slot keyed
//! by `vedavi_user` that survives restarts. `SessionStore` is the only code
//! that touches the slot; the gate writes through it on every mutation.
//!
//! TRADE-OFFS
//! ==========
//! Restore is fail-soft: a missing or malformed slot yields `None` and a
//! warning, never a startup crash. The cost is that corrupt data is
//! silently discarded and the user has to log in again.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Slot key under which the serialized session user is persisted.
pub const SESSION_SLOT_KEY: &str = "vedavi_user";

// =============================================================================
// USER
// =============================================================================

/// Privilege tier assigned by the authentication backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Caller,
}

/// The authenticated principal. Present if and only if a session exists;
/// `None` anywhere in the crate means logged-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque identifier issued by the authentication backend.
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Avatar image URL, if available. Never set at login time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Mirrors `id` for caller-scoped sessions, absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<String>,
}

// =============================================================================
// SLOT
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("slot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("slot encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable key-value slot: one string value per key, overwritten whole.
pub trait SessionSlot: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;
    fn write(&self, key: &str, value: &str) -> Result<(), SlotError>;
    fn remove(&self, key: &str) -> Result<(), SlotError>;
}

/// File-backed slot: each key maps to `<dir>/<key>.json`.
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            // Removing an absent slot succeeds so logout stays idempotent.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl<S: SessionSlot + ?Sized> SessionSlot for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        (**self).remove(key)
    }
}

/// In-memory slot for tests and ephemeral runs.
#[derive(Default)]
pub struct MemorySlot {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Write-through persistence for the session user.
pub struct SessionStore {
    slot: Box<dyn SessionSlot>,
}

impl SessionStore {
    #[must_use]
    pub fn new(slot: Box<dyn SessionSlot>) -> Self {
        Self { slot }
    }

    /// Read the persisted session, if any. Malformed or unreadable data is
    /// treated as absence: log and force a fresh login instead of crashing
    /// startup.
    #[must_use]
    pub fn restore(&self) -> Option<User> {
        let raw = match self.slot.read(SESSION_SLOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "session slot unreadable, treating as logged-out");
                return None;
            }
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "persisted session malformed, forcing re-login");
                None
            }
        }
    }

    /// Serialize and write the full user record, overwriting any previous
    /// value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the slot write fails.
    pub fn persist(&self, user: &User) -> Result<(), SlotError> {
        let raw = serde_json::to_string(user)?;
        self.slot.write(SESSION_SLOT_KEY, &raw)
    }

    /// Remove the durable slot entirely. Succeeds when the slot is already
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot removal fails.
    pub fn clear(&self) -> Result<(), SlotError> {
        self.slot.remove(SESSION_SLOT_KEY)
    }

    /// Raw slot contents, for callers that need to inspect the persisted
    /// form directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot read fails.
    pub fn raw(&self) -> Result<Option<String>, SlotError> {
        self.slot.read(SESSION_SLOT_KEY)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
