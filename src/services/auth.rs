//! Authentication collaborator — credential exchange against the backend.
//!
//! The gate never talks HTTP itself; it goes through the [`Authenticator`]
//! trait so tests can substitute a stub and the transport stays swappable.

use async_trait::async_trait;
use serde::Deserialize;

use crate::services::session::Role;

/// Authentication backend configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub login_url: String,
}

impl AuthConfig {
    /// Load from `AUTH_LOGIN_URL`. Returns `None` if unset (login will be
    /// disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let login_url = std::env::var("AUTH_LOGIN_URL").ok()?;
        Some(Self { login_url })
    }
}

/// Successful login response from the backend. Only these fields are
/// trusted; anything else in the payload is dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("credentials rejected: {0}")]
    Rejected(String),
    #[error("auth backend unreachable: {0}")]
    Transport(String),
}

/// Function-shaped dependency: exchange credentials for a user record.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginReply, AuthError>;
}

/// HTTP implementation posting credentials to the configured endpoint.
pub struct HttpAuthenticator {
    client: reqwest::Client,
    login_url: String,
}

impl HttpAuthenticator {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self { client: reqwest::Client::new(), login_url: config.login_url.clone() }
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn login(&self, email: &str, password: &str) -> Result<LoginReply, AuthError> {
        let resp = self
            .client
            .post(&self.login_url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::Rejected(format!("{status}: {body}")));
        }

        resp.json::<LoginReply>()
            .await
            .map_err(|e| AuthError::Transport(format!("unexpected response: {e}")))
    }
}

/// Stand-in when no backend is configured: every attempt is rejected so the
/// shell still serves the login view instead of refusing to start.
pub struct DisabledAuthenticator;

#[async_trait]
impl Authenticator for DisabledAuthenticator {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginReply, AuthError> {
        Err(AuthError::Rejected("authentication backend not configured".into()))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
