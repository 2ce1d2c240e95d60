//! DTOs for roleplay endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::application::handlers::roleplay::{RoleplayReply, SessionView};
use crate::domain::roleplay::{SessionPhase, Speaker, Turn};

/// Accepts an id sent either as a JSON string or a number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /start_chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartChatRequest {
    pub session_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub scenario_id: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub scenario_id: String,
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
    pub goals_answered: Vec<bool>,
    pub concluded: bool,
    pub degraded: bool,
    /// Persona opening when this call started the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening: Option<String>,
}

impl From<RoleplayReply> for ChatResponse {
    fn from(reply: RoleplayReply) -> Self {
        Self {
            session_id: reply.session_id.to_string(),
            response: reply.response,
            goals_answered: reply.goal_flags,
            concluded: reply.concluded,
            degraded: reply.degraded,
            opening: reply.opening,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub speaker: Speaker,
    pub text: String,
    pub at: String,
}

impl From<Turn> for TurnResponse {
    fn from(turn: Turn) -> Self {
        Self {
            speaker: turn.speaker,
            text: turn.text,
            at: turn.at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub scenario_id: String,
    pub persona_name: String,
    pub transcript: Vec<TurnResponse>,
    pub goal_questions: Vec<String>,
    pub goals_answered: Vec<bool>,
    pub phase: SessionPhase,
    pub concluded: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            scenario_id: view.scenario_id.to_string(),
            persona_name: view.persona_name,
            transcript: view.transcript.into_iter().map(TurnResponse::from).collect(),
            goal_questions: view.goal_questions,
            concluded: view.phase == SessionPhase::Concluded,
            goals_answered: view.goal_flags,
            phase: view.phase,
            created_at: view.created_at.to_rfc3339(),
            updated_at: view.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
