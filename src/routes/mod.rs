//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API surface (auth + sidebar endpoints) is registered explicitly;
//! every other GET falls through to the shell resolver, which walks the
//! route table and answers with a page, a redirect, or a 404.

pub mod auth;
pub mod shell;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/ui/sidebar", get(shell::sidebar_get).put(shell::sidebar_set))
        .route("/api/ui/sidebar/toggle", post(shell::sidebar_toggle))
        .route("/healthz", get(healthz))
        .fallback(shell::page)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}
