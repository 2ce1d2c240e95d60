//! Listing, exporting, adding and reloading scenarios.
//!
//! Sessions already running keep the persona they were created with; a
//! reload or add only affects sessions started afterwards.

use std::sync::Arc;

use crate::domain::foundation::ScenarioId;
use crate::domain::scenario::{Scenario, ScenarioSummary};
use crate::ports::{ScenarioStore, ScenarioStoreError};

#[derive(Clone)]
pub struct ListScenariosHandler {
    store: Arc<dyn ScenarioStore>,
}

impl ListScenariosHandler {
    pub fn new(store: Arc<dyn ScenarioStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Vec<ScenarioSummary> {
        self.store.list().await
    }
}

#[derive(Clone)]
pub struct ExportScenariosHandler {
    store: Arc<dyn ScenarioStore>,
}

impl ExportScenariosHandler {
    pub fn new(store: Arc<dyn ScenarioStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Vec<Scenario> {
        self.store.export().await
    }
}

#[derive(Debug, Clone)]
pub struct AddScenarioCommand {
    pub scenario: Scenario,
}

#[derive(Clone)]
pub struct AddScenarioHandler {
    store: Arc<dyn ScenarioStore>,
}

impl AddScenarioHandler {
    pub fn new(store: Arc<dyn ScenarioStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: AddScenarioCommand) -> Result<ScenarioId, ScenarioStoreError> {
        let id = cmd.scenario.id.clone();
        self.store.add(cmd.scenario).await?;
        Ok(id)
    }
}

#[derive(Clone)]
pub struct ReloadScenariosHandler {
    store: Arc<dyn ScenarioStore>,
}

impl ReloadScenariosHandler {
    pub fn new(store: Arc<dyn ScenarioStore>) -> Self {
        Self { store }
    }

    /// Returns the number of scenarios now loaded.
    pub async fn handle(&self) -> Result<usize, ScenarioStoreError> {
        self.store.reload().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::JsonScenarioStore;
    use crate::domain::scenario::ScenarioError;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Scenario {}", id),
            "chatActor": {
                "customerName": "Lee",
                "backstory": "Waiting on a parcel.",
                "tone": "anxious",
                "goalQuestions": ["Where is my parcel?"]
            }
        })
    }

    async fn store() -> (TempDir, Arc<JsonScenarioStore>) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scenarios.json");
        std::fs::write(&path, json!([record("1")]).to_string()).unwrap();
        let store = JsonScenarioStore::load(&path).await.unwrap();
        (dir, Arc::new(store))
    }

    #[tokio::test]
    async fn added_scenario_is_listed() {
        let (_dir, store) = store().await;
        let add = AddScenarioHandler::new(store.clone());
        let list = ListScenariosHandler::new(store.clone());

        let scenario: Scenario = serde_json::from_value(record("2")).unwrap();
        let id = add.handle(AddScenarioCommand { scenario }).await.unwrap();

        assert_eq!(id.as_str(), "2");
        let ids: Vec<_> = list.handle().await.into_iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn incomplete_scenario_is_not_added() {
        let (_dir, store) = store().await;
        let add = AddScenarioHandler::new(store.clone());

        let mut raw = record("3");
        raw["chatActor"].as_object_mut().unwrap().remove("tone");
        let scenario: Scenario = serde_json::from_value(raw).unwrap();

        let err = add.handle(AddScenarioCommand { scenario }).await.unwrap_err();
        assert!(matches!(
            err,
            ScenarioStoreError::Scenario(ScenarioError::Incomplete { field: "tone", .. })
        ));
        assert_eq!(ExportScenariosHandler::new(store).handle().await.len(), 1);
    }

    #[tokio::test]
    async fn reload_reports_count() {
        let (dir, store) = store().await;
        std::fs::write(
            dir.path().join("scenarios.json"),
            json!([record("1"), record("2"), record("3")]).to_string(),
        )
        .unwrap();

        let count = ReloadScenariosHandler::new(store).handle().await.unwrap();
        assert_eq!(count, 3);
    }
}
