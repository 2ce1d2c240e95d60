//! Scenario Store Port - Interface for the scenario document.

use async_trait::async_trait;

use crate::domain::foundation::ScenarioId;
use crate::domain::scenario::{Scenario, ScenarioError, ScenarioSummary};

/// Errors that can occur while reading or writing scenarios
#[derive(Debug, thiserror::Error)]
pub enum ScenarioStoreError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("Failed to read scenario document: {0}")]
    Io(String),

    #[error("Scenario document is not valid: {0}")]
    Parse(String),
}

impl ScenarioStoreError {
    pub fn not_found(id: &ScenarioId) -> Self {
        ScenarioStoreError::Scenario(ScenarioError::NotFound(id.clone()))
    }
}

/// Port for the catalog of roleplay scenarios.
///
/// Readers always see one consistent catalog; `reload` and `add` replace
/// it as a whole.
#[async_trait]
pub trait ScenarioStore: Send + Sync {
    /// Look up one scenario.
    ///
    /// # Errors
    /// `ScenarioError::NotFound` when no record has this id.
    async fn get(&self, id: &ScenarioId) -> Result<Scenario, ScenarioStoreError>;

    /// Id and title of every scenario, in document order.
    async fn list(&self) -> Vec<ScenarioSummary>;

    /// Every scenario record, in document order.
    async fn export(&self) -> Vec<Scenario>;

    /// Number of scenarios currently loaded.
    async fn count(&self) -> usize;

    /// Append a complete scenario and persist the document.
    ///
    /// # Errors
    /// `ScenarioError::AlreadyExists` for a duplicate id,
    /// `ScenarioError::Incomplete` for a record missing required data.
    async fn add(&self, scenario: Scenario) -> Result<(), ScenarioStoreError>;

    /// Re-read the document. On failure the previous catalog stays active.
    ///
    /// Returns the number of scenarios loaded.
    async fn reload(&self) -> Result<usize, ScenarioStoreError>;
}
