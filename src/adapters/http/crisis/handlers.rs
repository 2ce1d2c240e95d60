//! HTTP handler for crisis brief generation.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::crisis::{GenerateCrisisCommand, GenerateCrisisHandler};
use crate::domain::crisis::CrisisError;

use super::dto::{GenerateCrisisRequest, GenerateCrisisResponse};

#[derive(Clone)]
pub struct CrisisHandlers {
    crisis_handler: Arc<GenerateCrisisHandler>,
}

impl CrisisHandlers {
    pub fn new(crisis_handler: Arc<GenerateCrisisHandler>) -> Self {
        Self { crisis_handler }
    }
}

/// POST /generate_crisis - Generate a PR crisis brief
pub async fn generate_crisis(
    State(handlers): State<CrisisHandlers>,
    Json(req): Json<GenerateCrisisRequest>,
) -> Response {
    let cmd = GenerateCrisisCommand {
        client_industry: req.client_industry,
        crisis_type: req.crisis_type,
        severity: req.severity,
    };

    match handlers.crisis_handler.handle(cmd).await {
        Ok(result) => {
            let response = GenerateCrisisResponse {
                scenario: result.scenario,
                degraded: result.degraded,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_crisis_error(e),
    }
}

fn handle_crisis_error(error: CrisisError) -> Response {
    let details = match &error {
        CrisisError::MissingField(field) => serde_json::json!({ "field": field }),
        CrisisError::InvalidSeverity(value) => serde_json::json!({ "severity": value }),
    };
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(error.to_string()).with_details(details)),
    )
        .into_response()
}
