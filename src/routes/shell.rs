//! Shell routes — page resolution and sidebar chrome.
//!
//! DESIGN
//! ======
//! The fallback handler translates [`nav::Outcome`] uniformly: `Render`
//! becomes a 200 HTML shell, `Redirect` a temporary redirect (clients apply
//! it with history replacement), `NotFound` a 404. Guards never navigate on
//! their own.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use serde::{Deserialize, Serialize};

use crate::nav::{self, Outcome, View};
use crate::state::AppState;

/// Fallback `GET` — resolve any path against the route table.
pub async fn page(State(state): State<AppState>, uri: Uri) -> Response {
    let user = state.gate.current();
    match nav::resolve(uri.path(), user.as_ref()) {
        Outcome::Render(view) => Html(render_shell(view, state.sidebar.collapsed())).into_response(),
        Outcome::Redirect(target) => Redirect::temporary(target).into_response(),
        Outcome::NotFound => {
            (StatusCode::NOT_FOUND, Html(render_shell(View::NotFound, state.sidebar.collapsed())))
                .into_response()
        }
    }
}

/// Minimal page shell; real page content is rendered by the SPA, this
/// only marks which view the shell resolved and the sidebar state.
fn render_shell(view: View, collapsed: bool) -> String {
    let sidebar_class = if collapsed { "sidebar collapsed" } else { "sidebar" };
    format!(
        "<!doctype html>\n<html>\n<head><title>{title} — Vedavi</title></head>\n\
         <body>\n<aside class=\"{sidebar_class}\"></aside>\n\
         <main data-view=\"{title}\"><h1>{title}</h1></main>\n</body>\n</html>\n",
        title = view.title(),
    )
}

// =============================================================================
// SIDEBAR ENDPOINTS
// =============================================================================

#[derive(Serialize)]
pub struct SidebarReply {
    pub collapsed: bool,
}

#[derive(Deserialize)]
pub struct SidebarRequest {
    pub collapsed: bool,
}

/// `GET /api/ui/sidebar` — current collapse state.
pub async fn sidebar_get(State(state): State<AppState>) -> Json<SidebarReply> {
    Json(SidebarReply { collapsed: state.sidebar.collapsed() })
}

/// `PUT /api/ui/sidebar` — absolute set.
pub async fn sidebar_set(
    State(state): State<AppState>,
    Json(req): Json<SidebarRequest>,
) -> Json<SidebarReply> {
    state.sidebar.set_collapsed(req.collapsed);
    Json(SidebarReply { collapsed: state.sidebar.collapsed() })
}

/// `POST /api/ui/sidebar/toggle` — flip and return the new state.
pub async fn sidebar_toggle(State(state): State<AppState>) -> Json<SidebarReply> {
    Json(SidebarReply { collapsed: state.sidebar.toggle() })
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
