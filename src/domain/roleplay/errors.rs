//! Roleplay session errors.

use thiserror::Error;

use crate::domain::foundation::{ScenarioId, SessionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleplayError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Model reply cannot be empty")]
    EmptyReply,

    /// The session moved on between preparing and committing a turn.
    #[error("Session {0} changed while the turn was in flight")]
    StaleTurn(SessionId),

    #[error("Session {session} belongs to scenario '{bound}', not '{requested}'")]
    ScenarioMismatch {
        session: SessionId,
        bound: ScenarioId,
        requested: ScenarioId,
    },
}
