//! GetSessionHandler - read-only view of a live session.

use std::sync::Arc;

use crate::domain::foundation::{ScenarioId, SessionId, Timestamp};
use crate::domain::roleplay::{SessionPhase, Turn};
use crate::ports::SessionRegistry;

use super::RoleplayCommandError;

#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Snapshot of a session taken under its lock.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session_id: SessionId,
    pub scenario_id: ScenarioId,
    pub persona_name: String,
    pub transcript: Vec<Turn>,
    pub goal_questions: Vec<String>,
    pub goal_flags: Vec<bool>,
    pub phase: SessionPhase,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Clone)]
pub struct GetSessionHandler {
    sessions: Arc<dyn SessionRegistry>,
}

impl GetSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRegistry>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, RoleplayCommandError> {
        let shared = self
            .sessions
            .get(&query.session_id)
            .await
            .ok_or_else(|| RoleplayCommandError::SessionNotFound(query.session_id.clone()))?;

        let session = shared.lock().await;
        Ok(SessionView {
            session_id: session.id().clone(),
            scenario_id: session.scenario_id().clone(),
            persona_name: session.persona().name.clone(),
            transcript: session.transcript().turns().to_vec(),
            goal_questions: session.persona().goal_questions.clone(),
            goal_flags: session.goal_flags().to_vec(),
            phase: session.phase(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        })
    }
}
