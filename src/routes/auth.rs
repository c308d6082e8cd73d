//! Auth routes — login, logout, current user.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::services::session::{Role, User};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Whether the client wants a caller-scoped session. Does not override
    /// the role the backend assigns.
    pub role: Role,
}

/// `POST /api/auth/login` — exchange credentials for a session.
///
/// The gate exposes only success/failure, so every failure mode maps to a
/// bare 401; detail lives in the server log.
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    if !state.gate.login(&req.email, &req.password, req.role).await {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.gate.current() {
        Some(user) => Json(user).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// `POST /api/auth/logout` — drop the session. Safe to repeat.
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.gate.logout();
    StatusCode::NO_CONTENT
}

/// `GET /api/auth/me` — return the current user, 401 when logged out.
pub async fn me(State(state): State<AppState>) -> Result<Json<User>, StatusCode> {
    state.gate.current().map(Json).ok_or(StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
