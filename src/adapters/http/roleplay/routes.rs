//! HTTP routes for roleplay endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat, end_session, get_session, start_chat, RoleplayHandlers};

/// Creates the roleplay router with all endpoints.
pub fn roleplay_routes(handlers: RoleplayHandlers) -> Router {
    Router::new()
        .route("/start_chat", post(start_chat))
        .route("/chat", post(chat))
        .route("/sessions/:id", get(get_session).delete(end_session))
        .with_state(handlers)
}
