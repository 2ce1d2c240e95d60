//! Error body shared by every HTTP module.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::scenario::ScenarioError;

/// Error response DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    /// A scenario record cannot drive a session.
    pub fn misconfigured(message: impl Into<String>) -> Self {
        Self::new("SCENARIO_MISCONFIGURED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Maps scenario errors for every module that resolves scenarios.
pub fn scenario_error_response(error: ScenarioError) -> Response {
    match error {
        ScenarioError::NotFound(id) => ErrorResponse {
            code: "NOT_FOUND".to_string(),
            message: format!("Invalid scenario_id provided: {}", id),
            details: None,
        }
        .into_response_with(StatusCode::NOT_FOUND),
        ScenarioError::Incomplete { ref id, field } => {
            tracing::error!(scenario_id = %id, field, "Scenario record is incomplete");
            ErrorResponse::misconfigured(format!("Server configuration error: {}", error))
                .with_details(serde_json::json!({ "missing_key": field }))
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
        ScenarioError::AlreadyExists(_) => {
            ErrorResponse::conflict(error.to_string()).into_response_with(StatusCode::CONFLICT)
        }
        ScenarioError::Invalid(_) => {
            ErrorResponse::bad_request(error.to_string()).into_response_with(StatusCode::BAD_REQUEST)
        }
    }
}

/// 400 for a malformed identifier in a path or body.
pub fn invalid_id(kind: &str, raw: &str) -> Response {
    ErrorResponse::bad_request(format!("Invalid {}: '{}'", kind, raw))
        .into_response_with(StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ScenarioId;

    #[test]
    fn error_response_not_found_creates_correctly() {
        let error = ErrorResponse::not_found("Session", "abc-123");
        assert_eq!(error.code, "NOT_FOUND");
        assert!(error.message.contains("Session"));
        assert!(error.message.contains("abc-123"));
    }

    #[test]
    fn unknown_scenario_maps_to_404() {
        let response =
            scenario_error_response(ScenarioError::NotFound(ScenarioId::new("9").unwrap()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn incomplete_scenario_maps_to_500() {
        let id = ScenarioId::new("9").unwrap();
        let response = scenario_error_response(ScenarioError::incomplete(&id, "tone"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn duplicate_scenario_maps_to_409() {
        let id = ScenarioId::new("9").unwrap();
        let response = scenario_error_response(ScenarioError::AlreadyExists(id));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::bad_request("nope")).unwrap();
        assert!(json.get("details").is_none());
    }
}
