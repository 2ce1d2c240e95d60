//! SendMessageHandler - one trainee message, one persona reply.

use std::sync::Arc;

use uuid::Uuid;

use crate::adapters::ai::{CompletionOracle, OracleReply};
use crate::domain::foundation::{ScenarioId, SessionId};
use crate::domain::roleplay::{GoalMatcher, KeywordGoalMatcher, RoleplayError};
use crate::ports::{RequestMetadata, SessionRegistry, SharedSession};

use super::{
    RoleplayCommandError, RoleplayReply, StartRoleplayCommand, StartRoleplayHandler, StartStatus,
};

/// Command to send a trainee message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub session_id: SessionId,
    pub scenario_id: ScenarioId,
    pub message: String,
}

/// Handler for trainee messages.
///
/// Starts the session first when the id is unknown, so a client may skip
/// the explicit start call.
#[derive(Clone)]
pub struct SendMessageHandler {
    sessions: Arc<dyn SessionRegistry>,
    starter: StartRoleplayHandler,
    oracle: CompletionOracle,
    matcher: Arc<dyn GoalMatcher>,
}

impl SendMessageHandler {
    pub fn new(
        sessions: Arc<dyn SessionRegistry>,
        starter: StartRoleplayHandler,
        oracle: CompletionOracle,
    ) -> Self {
        Self {
            sessions,
            starter,
            oracle,
            matcher: Arc::new(KeywordGoalMatcher::default()),
        }
    }

    pub fn with_matcher(mut self, matcher: Arc<dyn GoalMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<RoleplayReply, RoleplayCommandError> {
        if cmd.message.trim().is_empty() {
            return Err(RoleplayError::EmptyMessage.into());
        }

        let (shared, opening) = match self.sessions.get(&cmd.session_id).await {
            Some(shared) => (shared, None),
            None => {
                let started = self
                    .starter
                    .handle(StartRoleplayCommand {
                        session_id: cmd.session_id.clone(),
                        scenario_id: cmd.scenario_id.clone(),
                    })
                    .await?;

                match (started.status, started.session) {
                    (StartStatus::Created, Some(shared)) => (shared, Some(started.reply.response)),
                    (StartStatus::Resumed, Some(shared)) => (shared, None),
                    // Opening failed: the fallback is all there is to show.
                    _ => return Ok(started.reply),
                }
            }
        };

        let mut reply = self.take_turn(&shared, &cmd).await?;
        reply.opening = opening;
        Ok(reply)
    }

    async fn take_turn(
        &self,
        shared: &SharedSession,
        cmd: &SendMessageCommand,
    ) -> Result<RoleplayReply, RoleplayCommandError> {
        // Held across the model call; turns on one session are serialized.
        let mut session = shared.lock().await;
        session.ensure_scenario(&cmd.scenario_id)?;

        let pending = session.prepare_turn(&cmd.message, self.matcher.as_ref())?;
        let metadata = RequestMetadata::for_session(
            cmd.session_id.clone(),
            "persona_reply",
            Uuid::new_v4().to_string(),
        );

        match self.oracle.complete(pending.prompt(), metadata).await {
            OracleReply::Generated(text) => {
                let outcome = session.commit_turn(pending, text)?;
                tracing::info!(
                    session_id = %cmd.session_id,
                    scenario_id = %cmd.scenario_id,
                    newly_answered = ?outcome.newly_answered,
                    concluded = outcome.concluded,
                    "Roleplay turn recorded"
                );
                Ok(RoleplayReply {
                    session_id: cmd.session_id.clone(),
                    response: outcome.reply,
                    goal_flags: outcome.goal_flags,
                    concluded: outcome.concluded,
                    degraded: false,
                    opening: None,
                })
            }
            OracleReply::Fallback(text) => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    "Persona reply not generated; turn discarded"
                );
                Ok(RoleplayReply {
                    session_id: cmd.session_id.clone(),
                    response: text.to_string(),
                    goal_flags: session.goal_flags().to_vec(),
                    concluded: session.is_concluded(),
                    degraded: true,
                    opening: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError, OracleSettings, FALLBACK_UNAVAILABLE};
    use crate::adapters::storage::InMemorySessionRegistry;
    use crate::application::handlers::roleplay::test_support::{scenario_store, scid, sid};
    use crate::domain::roleplay::{Speaker, CLOSING_DIRECTIVE};
    use std::time::Duration;

    struct Fixture {
        mock: MockAIProvider,
        registry: Arc<InMemorySessionRegistry>,
        handler: SendMessageHandler,
    }

    fn fixture(mock: MockAIProvider) -> Fixture {
        let registry = Arc::new(InMemorySessionRegistry::default());
        let oracle = CompletionOracle::new(Arc::new(mock.clone()), OracleSettings::default());
        let starter = StartRoleplayHandler::new(scenario_store(), registry.clone(), oracle.clone());
        let handler = SendMessageHandler::new(registry.clone(), starter, oracle);
        Fixture {
            mock,
            registry,
            handler,
        }
    }

    fn cmd(message: &str) -> SendMessageCommand {
        SendMessageCommand {
            session_id: sid("s1"),
            scenario_id: scid("refund"),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_session_is_started_before_the_message() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("My kettle is broken!")
                .with_response("What about the warranty?"),
        );

        let reply = f.handler.handle(cmd("Our refund policy is 30 days")).await.unwrap();

        assert_eq!(reply.opening.as_deref(), Some("My kettle is broken!"));
        assert_eq!(reply.response, "What about the warranty?");
        assert_eq!(reply.goal_flags, vec![true, false]);
        assert!(!reply.degraded);

        let shared = f.registry.get(&sid("s1")).await.unwrap();
        let session = shared.lock().await;
        let speakers: Vec<_> = session.transcript().turns().iter().map(|t| t.speaker).collect();
        assert_eq!(speakers, vec![Speaker::Persona, Speaker::Agent, Speaker::Persona]);
    }

    #[tokio::test]
    async fn answering_every_goal_sends_closing_directive() {
        let f = fixture(MockAIProvider::new().with_response("ok"));

        f.handler.handle(cmd("hello there")).await.unwrap();
        let reply = f
            .handler
            .handle(cmd("Full refund, and the warranty is two years"))
            .await
            .unwrap();

        assert!(reply.concluded);
        assert_eq!(reply.goal_flags, vec![true, true]);
        assert!(f.mock.last_prompt().unwrap().contains(CLOSING_DIRECTIVE));
    }

    #[tokio::test]
    async fn oracle_failure_leaves_session_unchanged() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("Hello, I need help.")
                .with_error(MockError::Timeout { timeout_secs: 30 }),
        );

        let reply = f.handler.handle(cmd("Our refund policy is generous")).await.unwrap();

        assert!(reply.degraded);
        assert_eq!(reply.response, FALLBACK_UNAVAILABLE);
        assert_eq!(reply.goal_flags, vec![false, false]);

        let shared = f.registry.get(&sid("s1")).await.unwrap();
        let session = shared.lock().await;
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.goal_flags(), &[false, false]);
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_starting() {
        let f = fixture(MockAIProvider::new());

        let err = f.handler.handle(cmd("   ")).await.unwrap_err();

        assert!(matches!(
            err,
            RoleplayCommandError::Roleplay(RoleplayError::EmptyMessage)
        ));
        assert_eq!(f.mock.call_count(), 0);
        assert!(f.registry.get(&sid("s1")).await.is_none());
    }

    #[tokio::test]
    async fn message_for_other_scenario_is_rejected() {
        let f = fixture(MockAIProvider::new());
        f.handler.handle(cmd("hello")).await.unwrap();

        let mut other = cmd("hello");
        other.scenario_id = scid("empty-goals");
        let err = f.handler.handle(other).await.unwrap_err();

        assert!(matches!(
            err,
            RoleplayCommandError::Roleplay(RoleplayError::ScenarioMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn failed_opening_returns_fallback_without_session() {
        let f = fixture(MockAIProvider::new().with_error(MockError::Network {
            message: "offline".to_string(),
        }));

        let reply = f.handler.handle(cmd("hello")).await.unwrap();

        assert!(reply.degraded);
        assert!(reply.opening.is_none());
        assert!(f.registry.get(&sid("s1")).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_messages_on_one_session_are_serialized() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("reply")
                .with_delay(Duration::from_millis(50)),
        );
        f.handler.handle(cmd("first")).await.unwrap();

        let a = f.handler.clone();
        let b = f.handler.clone();
        let ta = tokio::spawn(async move { a.handle(cmd("second")).await });
        let tb = tokio::spawn(async move { b.handle(cmd("third")).await });
        let (ra, rb) = (ta.await.unwrap(), tb.await.unwrap());
        ra.unwrap();
        rb.unwrap();

        let shared = f.registry.get(&sid("s1")).await.unwrap();
        let session = shared.lock().await;
        // opening + three exchanges
        assert_eq!(session.transcript().len(), 7);
        let speakers: Vec<_> = session.transcript().turns().iter().map(|t| t.speaker).collect();
        assert_eq!(
            speakers,
            vec![
                Speaker::Persona,
                Speaker::Agent,
                Speaker::Persona,
                Speaker::Agent,
                Speaker::Persona,
                Speaker::Agent,
                Speaker::Persona,
            ]
        );

        // The later turn was prompted with the earlier one already recorded.
        let last_prompt = f.mock.last_prompt().unwrap();
        assert!(last_prompt.contains("second") && last_prompt.contains("third"));
    }
}
