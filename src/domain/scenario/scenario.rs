//! Scenario records and the persona derived from them.
//!
//! A scenario is kept exactly as the document stores it. Most fields are
//! optional on load so that one broken record does not take the whole
//! document down; the gap surfaces when a session is created from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::ScenarioId;

use super::ScenarioError;

/// Role label used for the trainee when the scenario does not name one.
pub const DEFAULT_COUNTERPART_ROLE: &str = "Customer Service";

/// One record of the scenario document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: ScenarioId,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_facts: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_actor: Option<ChatActor>,

    /// Fields this service does not interpret, kept for export.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The simulated customer as written in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatActor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backstory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_questions: Option<Vec<String>>,

    /// How the persona addresses the trainee ("Customer Service", "PR Team", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterpart_role: Option<String>,
}

/// Validated persona that drives prompt generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub backstory: String,
    pub tone: String,
    pub initial_facts: Option<String>,
    pub goal_questions: Vec<String>,
    pub counterpart_role: String,
}

/// Short listing entry for scenario pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioSummary {
    pub id: ScenarioId,
    pub title: String,
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Scenario {
    /// Builds the persona for a new session.
    ///
    /// # Errors
    ///
    /// `ScenarioError::Incomplete` naming the first missing key.
    pub fn persona(&self) -> Result<Persona, ScenarioError> {
        let actor = self
            .chat_actor
            .as_ref()
            .ok_or_else(|| ScenarioError::incomplete(&self.id, "chatActor"))?;

        let name = required(&actor.customer_name)
            .ok_or_else(|| ScenarioError::incomplete(&self.id, "customerName"))?;
        let backstory = required(&actor.backstory)
            .ok_or_else(|| ScenarioError::incomplete(&self.id, "backstory"))?;
        let tone =
            required(&actor.tone).ok_or_else(|| ScenarioError::incomplete(&self.id, "tone"))?;

        let goal_questions = actor
            .goal_questions
            .as_ref()
            .ok_or_else(|| ScenarioError::incomplete(&self.id, "goalQuestions"))?;
        if goal_questions.iter().any(|q| q.trim().is_empty()) {
            return Err(ScenarioError::incomplete(&self.id, "goalQuestions"));
        }

        let counterpart_role = required(&actor.counterpart_role)
            .unwrap_or(DEFAULT_COUNTERPART_ROLE)
            .to_string();

        Ok(Persona {
            name: name.to_string(),
            backstory: backstory.to_string(),
            tone: tone.to_string(),
            initial_facts: required(&self.initial_facts).map(str::to_string),
            goal_questions: goal_questions.iter().map(|q| q.trim().to_string()).collect(),
            counterpart_role,
        })
    }

    /// Checks a record submitted for addition to the document.
    pub fn validate_complete(&self) -> Result<(), ScenarioError> {
        if self.title.trim().is_empty() {
            return Err(ScenarioError::incomplete(&self.id, "title"));
        }
        self.persona().map(|_| ())
    }

    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}
