//! EndSessionHandler - drops a session from the registry.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::SessionRegistry;

use super::RoleplayCommandError;

#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
}

#[derive(Clone)]
pub struct EndSessionHandler {
    sessions: Arc<dyn SessionRegistry>,
}

impl EndSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRegistry>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<(), RoleplayCommandError> {
        if !self.sessions.remove(&cmd.session_id).await {
            return Err(RoleplayCommandError::SessionNotFound(cmd.session_id));
        }
        tracing::info!(session_id = %cmd.session_id, "Roleplay session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionRegistry;
    use crate::application::handlers::roleplay::test_support::{scenarios, scid, sid};
    use crate::domain::roleplay::RoleplaySession;

    #[tokio::test]
    async fn ending_removes_the_session() {
        let registry = Arc::new(InMemorySessionRegistry::default());
        let persona = scenarios()[0].persona().unwrap();
        registry
            .insert_if_absent(RoleplaySession::open(sid("s1"), scid("refund"), persona, "Hi").unwrap())
            .await;
        let handler = EndSessionHandler::new(registry.clone());

        handler
            .handle(EndSessionCommand { session_id: sid("s1") })
            .await
            .unwrap();

        assert!(registry.get(&sid("s1")).await.is_none());
        let again = handler
            .handle(EndSessionCommand { session_id: sid("s1") })
            .await;
        assert!(matches!(again, Err(RoleplayCommandError::SessionNotFound(_))));
    }
}
