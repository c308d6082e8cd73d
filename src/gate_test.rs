use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use super::*;
use crate::services::auth::LoginReply;
use crate::services::session::{MemorySlot, SESSION_SLOT_KEY, SessionSlot};
use crate::state::test_helpers::{StubAuthenticator, seeded_slot, stub_reply};

fn gate_with(slot: Arc<MemorySlot>, authenticator: Arc<dyn Authenticator>) -> AuthGate {
    AuthGate::new(SessionStore::new(Box::new(slot)), authenticator)
}

fn accepting_gate(slot: Arc<MemorySlot>) -> AuthGate {
    gate_with(slot, Arc::new(StubAuthenticator::succeeding(stub_reply())))
}

// =============================================================================
// Login round-trip
// =============================================================================

#[tokio::test]
async fn login_success_sets_memory_and_slot() {
    let slot = Arc::new(MemorySlot::new());
    let gate = accepting_gate(slot.clone());

    assert!(gate.login("a@x.com", "pw", Role::Caller).await);
    assert!(gate.is_authenticated());

    let user = gate.current().expect("user should be set");
    assert_eq!(user.id, "u1");
    assert_eq!(user.caller_id.as_deref(), Some("u1"));
    assert_eq!(user.avatar, None);

    let raw = slot.read(SESSION_SLOT_KEY).unwrap().expect("slot should be written");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 5);
    assert_eq!(obj["id"], "u1");
    assert_eq!(obj["name"], "Ann");
    assert_eq!(obj["email"], "a@x.com");
    assert_eq!(obj["role"], "caller");
    assert_eq!(obj["callerId"], "u1");
    assert!(!obj.contains_key("avatar"));
}

#[tokio::test]
async fn login_with_admin_role_hint_leaves_caller_id_unset() {
    // The backend reply says role=caller; the caller-supplied role argument
    // alone decides whether the session is caller-scoped.
    let gate = accepting_gate(Arc::new(MemorySlot::new()));

    assert!(gate.login("a@x.com", "pw", Role::Admin).await);

    let user = gate.current().expect("user should be set");
    assert_eq!(user.caller_id, None);
    assert_eq!(user.role, Role::Caller, "backend role is copied verbatim");
}

#[tokio::test]
async fn login_overwrites_previous_session() {
    let slot = Arc::new(MemorySlot::new());
    let gate = accepting_gate(slot.clone());

    assert!(gate.login("a@x.com", "pw", Role::Admin).await);
    assert_eq!(gate.current().unwrap().caller_id, None);

    assert!(gate.login("a@x.com", "pw", Role::Caller).await);
    assert_eq!(gate.current().unwrap().caller_id.as_deref(), Some("u1"));

    let raw = slot.read(SESSION_SLOT_KEY).unwrap().unwrap();
    assert!(raw.contains("callerId"));
}

// =============================================================================
// Login failure
// =============================================================================

#[tokio::test]
async fn rejected_login_mutates_nothing() {
    let slot = Arc::new(MemorySlot::new());
    let gate = gate_with(slot.clone(), Arc::new(StubAuthenticator::rejecting()));

    assert!(!gate.login("a@x.com", "wrong", Role::Caller).await);
    assert!(!gate.is_authenticated());
    assert_eq!(slot.read(SESSION_SLOT_KEY).unwrap(), None);
}

#[tokio::test]
async fn rejected_login_keeps_existing_session() {
    let slot = seeded_slot(
        r#"{"id":"u1","name":"Ann","email":"a@x.com","role":"caller","callerId":"u1"}"#,
    );
    let gate = gate_with(slot.clone(), Arc::new(StubAuthenticator::rejecting()));
    assert!(gate.is_authenticated());

    assert!(!gate.login("a@x.com", "wrong", Role::Caller).await);

    assert!(gate.is_authenticated());
    assert_eq!(gate.current().unwrap().id, "u1");
    assert!(slot.read(SESSION_SLOT_KEY).unwrap().is_some());
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn logout_clears_memory_and_slot() {
    let slot = Arc::new(MemorySlot::new());
    let gate = accepting_gate(slot.clone());
    assert!(gate.login("a@x.com", "pw", Role::Caller).await);

    gate.logout();

    assert!(!gate.is_authenticated());
    assert_eq!(slot.read(SESSION_SLOT_KEY).unwrap(), None);
}

#[tokio::test]
async fn logout_twice_is_idempotent() {
    let slot = Arc::new(MemorySlot::new());
    let gate = accepting_gate(slot.clone());
    assert!(gate.login("a@x.com", "pw", Role::Caller).await);

    gate.logout();
    assert!(!gate.is_authenticated());
    assert_eq!(slot.read(SESSION_SLOT_KEY).unwrap(), None);

    gate.logout();
    assert!(!gate.is_authenticated());
    assert_eq!(slot.read(SESSION_SLOT_KEY).unwrap(), None);
}

#[test]
fn logout_when_never_logged_in_is_a_noop() {
    let gate = gate_with(Arc::new(MemorySlot::new()), Arc::new(StubAuthenticator::rejecting()));
    gate.logout();
    assert!(!gate.is_authenticated());
}

// =============================================================================
// Startup restore
// =============================================================================

#[test]
fn gate_restores_persisted_session_at_construction() {
    let slot = seeded_slot(
        r#"{"id":"u7","name":"Di","email":"d@x.com","role":"admin"}"#,
    );
    let gate = gate_with(slot, Arc::new(StubAuthenticator::rejecting()));

    let user = gate.current().expect("session should be restored");
    assert_eq!(user.id, "u7");
    assert_eq!(user.role, Role::Admin);
}

#[test]
fn gate_treats_malformed_slot_as_logged_out() {
    let slot = seeded_slot("definitely not json");
    let gate = gate_with(slot, Arc::new(StubAuthenticator::rejecting()));
    assert!(!gate.is_authenticated());
}

// =============================================================================
// Single-flight login
// =============================================================================

/// Authenticator that parks until released, to hold a login in flight.
struct ParkedAuthenticator {
    release: Notify,
}

#[async_trait]
impl Authenticator for ParkedAuthenticator {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginReply, AuthError> {
        self.release.notified().await;
        Ok(stub_reply())
    }
}

#[tokio::test]
async fn concurrent_login_is_rejected_while_one_is_in_flight() {
    let authenticator = Arc::new(ParkedAuthenticator { release: Notify::new() });
    let gate = Arc::new(gate_with(Arc::new(MemorySlot::new()), authenticator.clone()));

    let first = tokio::spawn({
        let gate = gate.clone();
        async move { gate.login("a@x.com", "pw", Role::Caller).await }
    });

    // Let the first attempt reach the authenticator and park.
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    assert!(!gate.login("a@x.com", "pw", Role::Caller).await, "second attempt must be rejected");
    assert!(!gate.is_authenticated());

    authenticator.release.notify_one();
    assert!(first.await.unwrap(), "first attempt should still succeed");
    assert!(gate.is_authenticated());
}

#[tokio::test]
async fn latch_resets_after_failed_login() {
    let slot = Arc::new(MemorySlot::new());
    let rejecting = gate_with(slot, Arc::new(StubAuthenticator::rejecting()));

    assert!(!rejecting.login("a@x.com", "pw", Role::Caller).await);
    // A later attempt is not blocked by the earlier failure.
    assert!(!rejecting.login("a@x.com", "pw", Role::Caller).await);
}
