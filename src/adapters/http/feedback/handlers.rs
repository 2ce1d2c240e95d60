//! HTTP handler for the feedback endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::invalid_id;
use crate::adapters::http::roleplay::handle_roleplay_error;
use crate::application::handlers::feedback::{GenerateFeedbackCommand, GenerateFeedbackHandler};
use crate::domain::foundation::{ScenarioId, SessionId};

use super::dto::{FeedbackRequest, FeedbackResponse};

#[derive(Clone)]
pub struct FeedbackHandlers {
    feedback_handler: Arc<GenerateFeedbackHandler>,
}

impl FeedbackHandlers {
    pub fn new(feedback_handler: Arc<GenerateFeedbackHandler>) -> Self {
        Self { feedback_handler }
    }
}

/// POST /feedback - Coaching evaluation of a roleplay
pub async fn generate_feedback(
    State(handlers): State<FeedbackHandlers>,
    Json(req): Json<FeedbackRequest>,
) -> Response {
    let scenario_id = match ScenarioId::new(&req.scenario_id) {
        Ok(id) => id,
        Err(_) => return invalid_id("scenario_id", &req.scenario_id),
    };
    let session_id = match req.session_id.as_deref().map(SessionId::new).transpose() {
        Ok(id) => id,
        Err(_) => return invalid_id("session_id", req.session_id.as_deref().unwrap_or_default()),
    };

    let cmd = GenerateFeedbackCommand {
        scenario_id,
        session_id,
        history: req.history,
    };

    match handlers.feedback_handler.handle(cmd).await {
        Ok(result) => {
            let response = FeedbackResponse {
                feedback: result.feedback,
                degraded: result.degraded,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_roleplay_error(e),
    }
}
