//! Ordered record of what was said in a roleplay session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The simulated customer (model output).
    Persona,
    /// The trainee playing the service role.
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: Timestamp,
}

/// Append-only list of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.turns.push(Turn {
            speaker,
            text: text.into(),
            at: Timestamp::now(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Renders `label: text` lines using the given speaker labels.
    pub fn render(&self, persona_label: &str, agent_label: &str) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            let label = match turn.speaker {
                Speaker::Persona => persona_label,
                Speaker::Agent => agent_label,
            };
            out.push_str(label);
            out.push_str(": ");
            out.push_str(&turn.text);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_labels_each_turn() {
        let mut transcript = Transcript::new();
        transcript.push(Speaker::Persona, "Where is my sofa?");
        transcript.push(Speaker::Agent, "Let me check.");

        assert_eq!(
            transcript.render("Customer", "Customer Service"),
            "Customer: Where is my sofa?\nCustomer Service: Let me check.\n"
        );
    }

    #[test]
    fn empty_transcript_renders_nothing() {
        assert_eq!(Transcript::new().render("a", "b"), "");
    }

    #[test]
    fn speaker_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Speaker::Persona).unwrap(), "\"persona\"");
    }
}
