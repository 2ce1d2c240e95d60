//! HTTP routes for the feedback endpoint.

use axum::{routing::post, Router};

use super::handlers::{generate_feedback, FeedbackHandlers};

pub fn feedback_routes(handlers: FeedbackHandlers) -> Router {
    Router::new()
        .route("/feedback", post(generate_feedback))
        .with_state(handlers)
}
