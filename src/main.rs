mod gate;
mod nav;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use gate::AuthGate;
use services::auth::{AuthConfig, Authenticator, DisabledAuthenticator, HttpAuthenticator};
use services::session::{FileSlot, SessionStore};
use services::sidebar::Sidebar;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let session_dir = std::env::var("VEDAVI_SESSION_DIR").unwrap_or_else(|_| ".vedavi".into());

    // Non-fatal: without a backend the shell still serves the login view,
    // it just rejects every credential.
    let authenticator: Arc<dyn Authenticator> = match AuthConfig::from_env() {
        Some(config) => Arc::new(HttpAuthenticator::new(&config)),
        None => {
            tracing::warn!("AUTH_LOGIN_URL not set — login disabled");
            Arc::new(DisabledAuthenticator)
        }
    };

    let store = SessionStore::new(Box::new(FileSlot::new(&session_dir)));
    let gate = AuthGate::new(store, authenticator);
    let state = state::AppState::new(gate, Sidebar::new());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, %session_dir, "vedavi shell listening");
    axum::serve(listener, app).await.expect("server failed");
}
