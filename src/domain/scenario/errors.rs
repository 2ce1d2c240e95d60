//! Scenario domain errors.

use thiserror::Error;

use crate::domain::foundation::{ScenarioId, ValidationError};

/// Errors raised while resolving or validating scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("Scenario not found: {0}")]
    NotFound(ScenarioId),

    /// The record exists but is missing something a session needs.
    #[error("Incomplete scenario data for ID '{id}'. Missing key: {field}")]
    Incomplete { id: ScenarioId, field: &'static str },

    #[error("Scenario '{0}' already exists")]
    AlreadyExists(ScenarioId),

    #[error("Invalid scenario: {0}")]
    Invalid(#[from] ValidationError),
}

impl ScenarioError {
    pub fn incomplete(id: &ScenarioId, field: &'static str) -> Self {
        ScenarioError::Incomplete {
            id: id.clone(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_names_the_missing_key() {
        let id = ScenarioId::new("7").unwrap();
        let err = ScenarioError::incomplete(&id, "backstory");
        assert_eq!(
            err.to_string(),
            "Incomplete scenario data for ID '7'. Missing key: backstory"
        );
    }

    #[test]
    fn not_found_displays_id() {
        let err = ScenarioError::NotFound(ScenarioId::new("missing").unwrap());
        assert!(err.to_string().contains("missing"));
    }
}
