//! GenerateFeedbackHandler - coaching evaluation of a roleplay.
//!
//! The transcript is taken from the live session when one is named and
//! still registered, otherwise from the history the client sent.

use std::sync::Arc;

use uuid::Uuid;

use crate::adapters::ai::CompletionOracle;
use crate::application::handlers::roleplay::RoleplayCommandError;
use crate::domain::feedback::{FeedbackLine, FeedbackPrompt};
use crate::domain::foundation::{ScenarioId, SessionId};
use crate::ports::{RequestMetadata, ScenarioStore, SessionRegistry};

#[derive(Debug, Clone)]
pub struct GenerateFeedbackCommand {
    pub scenario_id: ScenarioId,
    pub session_id: Option<SessionId>,
    pub history: Option<Vec<FeedbackLine>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackResult {
    pub feedback: String,
    pub degraded: bool,
}

#[derive(Clone)]
pub struct GenerateFeedbackHandler {
    scenarios: Arc<dyn ScenarioStore>,
    sessions: Arc<dyn SessionRegistry>,
    oracle: CompletionOracle,
}

impl GenerateFeedbackHandler {
    pub fn new(
        scenarios: Arc<dyn ScenarioStore>,
        sessions: Arc<dyn SessionRegistry>,
        oracle: CompletionOracle,
    ) -> Self {
        Self {
            scenarios,
            sessions,
            oracle,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateFeedbackCommand,
    ) -> Result<FeedbackResult, RoleplayCommandError> {
        let scenario = self.scenarios.get(&cmd.scenario_id).await?;
        let persona = scenario.persona()?;

        let live = match &cmd.session_id {
            Some(id) => self.sessions.get(id).await,
            None => None,
        };

        let (lines, goal_flags) = match (live, cmd.history) {
            (Some(shared), _) => {
                let session = shared.lock().await;
                session.ensure_scenario(&cmd.scenario_id)?;
                (
                    FeedbackLine::from_transcript(session.transcript(), session.persona()),
                    Some(session.goal_flags().to_vec()),
                )
            }
            (None, Some(history)) => (history, None),
            (None, None) => {
                return Err(match cmd.session_id {
                    Some(id) => RoleplayCommandError::SessionNotFound(id),
                    None => RoleplayCommandError::MissingTranscript,
                })
            }
        };

        let prompt = FeedbackPrompt {
            title: &scenario.title,
            persona: &persona,
            goal_flags: goal_flags.as_deref(),
            lines: &lines,
        }
        .render();

        let metadata = match cmd.session_id {
            Some(id) => RequestMetadata::for_session(id, "feedback", Uuid::new_v4().to_string()),
            None => RequestMetadata::new("feedback", Uuid::new_v4().to_string()),
        };

        let reply = self.oracle.complete(&prompt, metadata).await;
        tracing::info!(
            scenario_id = %cmd.scenario_id,
            lines = lines.len(),
            degraded = reply.is_fallback(),
            "Feedback generated"
        );

        Ok(FeedbackResult {
            degraded: reply.is_fallback(),
            feedback: reply.into_text(),
        })
    }
}
