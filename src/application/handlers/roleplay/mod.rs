//! Roleplay handlers - start, continue, inspect and end sessions.

mod end_session;
mod errors;
mod get_session;
mod send_message;
mod start_roleplay;

pub use end_session::{EndSessionCommand, EndSessionHandler};
pub use errors::RoleplayCommandError;
pub use get_session::{GetSessionHandler, GetSessionQuery, SessionView};
pub use send_message::{SendMessageCommand, SendMessageHandler};
pub use start_roleplay::{
    StartRoleplayCommand, StartRoleplayHandler, StartRoleplayResult, StartStatus,
};

use crate::domain::foundation::SessionId;
use crate::domain::roleplay::RoleplaySession;

/// What the trainee sees after starting or continuing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleplayReply {
    pub session_id: SessionId,
    /// Persona text, or fallback text when `degraded`.
    pub response: String,
    pub goal_flags: Vec<bool>,
    pub concluded: bool,
    /// True when `response` is fallback text and nothing was recorded.
    pub degraded: bool,
    /// Opening message, set when a `/chat` call had to start the session.
    pub opening: Option<String>,
}

impl RoleplayReply {
    /// Reply echoing the most recent persona message of a session.
    pub(crate) fn latest(session: &RoleplaySession, degraded: bool) -> Self {
        Self {
            session_id: session.id().clone(),
            response: session.last_persona_text().unwrap_or_default().to_string(),
            goal_flags: session.goal_flags().to_vec(),
            concluded: session.is_concluded(),
            degraded,
            opening: None,
        }
    }
}
