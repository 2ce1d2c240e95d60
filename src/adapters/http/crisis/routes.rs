//! HTTP routes for crisis brief generation.

use axum::{routing::post, Router};

use super::handlers::{generate_crisis, CrisisHandlers};

pub fn crisis_routes(handlers: CrisisHandlers) -> Router {
    Router::new()
        .route("/generate_crisis", post(generate_crisis))
        .with_state(handlers)
}
