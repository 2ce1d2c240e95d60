//! DTOs for the feedback endpoint.

use serde::{Deserialize, Serialize};

use crate::adapters::http::roleplay::string_or_number;
use crate::domain::feedback::FeedbackLine;

/// Body of `POST /feedback`. Either `session_id` or `history` must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub scenario_id: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<FeedbackLine>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub feedback: String,
    pub degraded: bool,
}
