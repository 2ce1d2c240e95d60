//! Errors shared by the roleplay command and query handlers.

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::roleplay::RoleplayError;
use crate::domain::scenario::ScenarioError;
use crate::ports::ScenarioStoreError;

#[derive(Debug, Error)]
pub enum RoleplayCommandError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Roleplay(#[from] RoleplayError),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Either session_id or history is required")]
    MissingTranscript,

    #[error("Scenario storage error: {0}")]
    Storage(String),
}

impl From<ScenarioStoreError> for RoleplayCommandError {
    fn from(err: ScenarioStoreError) -> Self {
        match err {
            ScenarioStoreError::Scenario(inner) => RoleplayCommandError::Scenario(inner),
            other => RoleplayCommandError::Storage(other.to_string()),
        }
    }
}
