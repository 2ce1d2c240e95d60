//! GenerateCrisisHandler - free-standing PR crisis brief.

use uuid::Uuid;

use crate::adapters::ai::CompletionOracle;
use crate::domain::crisis::{CrisisError, CrisisRequest};
use crate::ports::RequestMetadata;

#[derive(Debug, Clone)]
pub struct GenerateCrisisCommand {
    pub client_industry: String,
    pub crisis_type: String,
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrisisResult {
    pub scenario: String,
    pub degraded: bool,
}

#[derive(Clone)]
pub struct GenerateCrisisHandler {
    oracle: CompletionOracle,
}

impl GenerateCrisisHandler {
    pub fn new(oracle: CompletionOracle) -> Self {
        Self { oracle }
    }

    pub async fn handle(&self, cmd: GenerateCrisisCommand) -> Result<CrisisResult, CrisisError> {
        let request = CrisisRequest::new(&cmd.client_industry, &cmd.crisis_type, &cmd.severity)?;

        let reply = self
            .oracle
            .complete(
                &request.prompt(),
                RequestMetadata::new("crisis", Uuid::new_v4().to_string()),
            )
            .await;

        tracing::info!(
            severity = %request.severity(),
            degraded = reply.is_fallback(),
            "Crisis brief generated"
        );

        Ok(CrisisResult {
            degraded: reply.is_fallback(),
            scenario: reply.into_text(),
        })
    }
}
