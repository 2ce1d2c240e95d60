//! DTOs for scenario endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::scenario::{Scenario, ScenarioSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummaryResponse {
    pub id: String,
    pub title: String,
}

impl From<ScenarioSummary> for ScenarioSummaryResponse {
    fn from(summary: ScenarioSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddScenarioResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadScenariosResponse {
    pub scenarios: usize,
}

/// Reads a submitted scenario record, accepting a numeric id.
pub fn parse_scenario(mut body: Value) -> Result<Scenario, String> {
    if let Some(object) = body.as_object_mut() {
        if let Some(Value::Number(n)) = object.get("id") {
            let id = n.to_string();
            object.insert("id".to_string(), Value::String(id));
        }
    }
    serde_json::from_value(body).map_err(|e| format!("Invalid scenario record: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_id_is_accepted() {
        let scenario = parse_scenario(json!({"id": 12, "title": "T"})).unwrap();
        assert_eq!(scenario.id.as_str(), "12");
    }

    #[test]
    fn missing_id_is_rejected() {
        let err = parse_scenario(json!({"title": "T"})).unwrap_err();
        assert!(err.starts_with("Invalid scenario record"));
    }
}
