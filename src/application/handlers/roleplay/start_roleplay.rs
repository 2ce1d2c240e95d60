//! StartRoleplayHandler - opens a session with the persona's first message.

use std::sync::Arc;

use uuid::Uuid;

use crate::adapters::ai::{CompletionOracle, OracleReply};
use crate::domain::foundation::{ScenarioId, SessionId};
use crate::domain::roleplay::RoleplaySession;
use crate::ports::{Registration, RequestMetadata, ScenarioStore, SessionRegistry, SharedSession};

use super::{RoleplayCommandError, RoleplayReply};

/// Command to start (or resume) a roleplay session.
#[derive(Debug, Clone)]
pub struct StartRoleplayCommand {
    pub session_id: SessionId,
    pub scenario_id: ScenarioId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartStatus {
    /// A new session was registered.
    Created,
    /// The id already held a live session for this scenario.
    Resumed,
    /// The opening could not be generated; nothing was registered.
    NotStarted,
}

#[derive(Debug, Clone)]
pub struct StartRoleplayResult {
    pub status: StartStatus,
    pub reply: RoleplayReply,
    /// The registered session, absent when `NotStarted`.
    pub session: Option<SharedSession>,
}

/// Handler for starting sessions.
#[derive(Clone)]
pub struct StartRoleplayHandler {
    scenarios: Arc<dyn ScenarioStore>,
    sessions: Arc<dyn SessionRegistry>,
    oracle: CompletionOracle,
}

impl StartRoleplayHandler {
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
        cmd: StartRoleplayCommand,
    ) -> Result<StartRoleplayResult, RoleplayCommandError> {
        if let Some(existing) = self.sessions.get(&cmd.session_id).await {
            return Self::resume(existing, &cmd.scenario_id).await;
        }

        // 1. Resolve persona; an incomplete record fails before any model call
        let scenario = self.scenarios.get(&cmd.scenario_id).await?;
        let persona = scenario.persona()?;

        // 2. Generate the opening
        let prompt = RoleplaySession::opening_prompt(&persona);
        let metadata = RequestMetadata::for_session(
            cmd.session_id.clone(),
            "opening",
            Uuid::new_v4().to_string(),
        );

        let opening = match self.oracle.complete(&prompt, metadata).await {
            OracleReply::Generated(text) => text,
            OracleReply::Fallback(text) => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    scenario_id = %cmd.scenario_id,
                    "Opening not generated; session not registered"
                );
                return Ok(StartRoleplayResult {
                    status: StartStatus::NotStarted,
                    reply: RoleplayReply {
                        session_id: cmd.session_id,
                        response: text.to_string(),
                        goal_flags: vec![false; persona.goal_questions.len()],
                        concluded: false,
                        degraded: true,
                        opening: None,
                    },
                    session: None,
                });
            }
        };

        // 3. Register; a concurrent start for the same id keeps the first
        let session = RoleplaySession::open(
            cmd.session_id.clone(),
            cmd.scenario_id.clone(),
            persona,
            opening,
        )?;

        match self.sessions.insert_if_absent(session).await {
            Registration::Inserted(shared) => {
                let reply = {
                    let session = shared.lock().await;
                    tracing::info!(
                        session_id = %session.id(),
                        scenario_id = %session.scenario_id(),
                        goals = session.goal_flags().len(),
                        "Roleplay session started"
                    );
                    RoleplayReply::latest(&session, false)
                };
                Ok(StartRoleplayResult {
                    status: StartStatus::Created,
                    reply,
                    session: Some(shared),
                })
            }
            Registration::Existing(shared) => Self::resume(shared, &cmd.scenario_id).await,
        }
    }

    async fn resume(
        shared: SharedSession,
        scenario_id: &ScenarioId,
    ) -> Result<StartRoleplayResult, RoleplayCommandError> {
        let reply = {
            let session = shared.lock().await;
            session.ensure_scenario(scenario_id)?;
            tracing::debug!(session_id = %session.id(), "Resuming existing session");
            RoleplayReply::latest(&session, false)
        };

        Ok(StartRoleplayResult {
            status: StartStatus::Resumed,
            reply,
            session: Some(shared),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError, OracleSettings, FALLBACK_UNAVAILABLE};
    use crate::adapters::storage::InMemorySessionRegistry;
    use crate::application::handlers::roleplay::test_support::{scenario_store, sid, scid};
    use crate::domain::roleplay::Speaker;
    use crate::domain::scenario::ScenarioError;

    fn handler(mock: MockAIProvider) -> (StartRoleplayHandler, Arc<InMemorySessionRegistry>) {
        let registry = Arc::new(InMemorySessionRegistry::default());
        let handler = StartRoleplayHandler::new(
            scenario_store(),
            registry.clone(),
            CompletionOracle::new(Arc::new(mock), OracleSettings::default()),
        );
        (handler, registry)
    }

    fn cmd(session: &str, scenario: &str) -> StartRoleplayCommand {
        StartRoleplayCommand {
            session_id: sid(session),
            scenario_id: scid(scenario),
        }
    }

    #[tokio::test]
    async fn start_registers_session_with_persona_opening() {
        let mock = MockAIProvider::new().with_response("Hi, my kettle broke. What is your refund policy?");
        let (handler, registry) = handler(mock.clone());

        let result = handler.handle(cmd("s1", "refund")).await.unwrap();

        assert_eq!(result.status, StartStatus::Created);
        assert!(!result.reply.degraded);
        assert_eq!(result.reply.goal_flags, vec![false, false]);

        let shared = registry.get(&sid("s1")).await.unwrap();
        let session = shared.lock().await;
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().turns()[0].speaker, Speaker::Persona);

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("You are a customer named 'Dana'"));
    }

    #[tokio::test]
    async fn failed_opening_registers_nothing() {
        let mock = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });
        let (handler, registry) = handler(mock);

        let result = handler.handle(cmd("s1", "refund")).await.unwrap();

        assert_eq!(result.status, StartStatus::NotStarted);
        assert!(result.reply.degraded);
        assert_eq!(result.reply.response, FALLBACK_UNAVAILABLE);
        assert!(result.session.is_none());
        assert!(registry.get(&sid("s1")).await.is_none());
    }

    #[tokio::test]
    async fn second_start_resumes_without_model_call() {
        let mock = MockAIProvider::new().with_response("Opening line");
        let (handler, _registry) = handler(mock.clone());

        handler.handle(cmd("s1", "refund")).await.unwrap();
        let again = handler.handle(cmd("s1", "refund")).await.unwrap();

        assert_eq!(again.status, StartStatus::Resumed);
        assert_eq!(again.reply.response, "Opening line");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn start_with_other_scenario_is_rejected() {
        let (handler, _registry) = handler(MockAIProvider::new());
        handler.handle(cmd("s1", "refund")).await.unwrap();

        let err = handler.handle(cmd("s1", "empty-goals")).await.unwrap_err();
        assert!(matches!(
            err,
            RoleplayCommandError::Roleplay(crate::domain::roleplay::RoleplayError::ScenarioMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_scenario_is_not_found() {
        let (handler, _registry) = handler(MockAIProvider::new());

        let err = handler.handle(cmd("s1", "missing")).await.unwrap_err();
        assert!(matches!(
            err,
            RoleplayCommandError::Scenario(ScenarioError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn incomplete_scenario_fails_before_model_call() {
        let mock = MockAIProvider::new();
        let (handler, _registry) = handler(mock.clone());

        let err = handler.handle(cmd("s1", "broken")).await.unwrap_err();

        assert!(matches!(
            err,
            RoleplayCommandError::Scenario(ScenarioError::Incomplete { field: "backstory", .. })
        ));
        assert_eq!(mock.call_count(), 0);
    }
}
