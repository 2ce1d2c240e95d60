//! Builds the evaluation prompt sent to the model after a roleplay.

use serde::{Deserialize, Serialize};

use crate::domain::roleplay::{Speaker, Transcript};
use crate::domain::scenario::Persona;

/// Section headings the evaluation must contain.
pub const FEEDBACK_SECTIONS: [&str; 4] = [
    "Goal Achievement",
    "Tone and Empathy",
    "Strategy",
    "Areas for Improvement",
];

/// One line of conversation, as sent by a client or taken from a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackLine {
    pub role: String,
    pub text: String,
}

impl FeedbackLine {
    pub fn from_transcript(transcript: &Transcript, persona: &Persona) -> Vec<Self> {
        transcript
            .turns()
            .iter()
            .map(|turn| FeedbackLine {
                role: match turn.speaker {
                    Speaker::Persona => persona.name.clone(),
                    Speaker::Agent => persona.counterpart_role.clone(),
                },
                text: turn.text.clone(),
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct FeedbackPrompt<'a> {
    pub title: &'a str,
    pub persona: &'a Persona,
    /// Answered flags when the transcript came from a live session.
    pub goal_flags: Option<&'a [bool]>,
    pub lines: &'a [FeedbackLine],
}

impl FeedbackPrompt<'_> {
    pub fn render(&self) -> String {
        let persona = self.persona;
        let mut prompt = format!(
            "You are an experienced communications coach. Evaluate how the trainee, acting as {}, handled the following roleplay.\n\n",
            persona.counterpart_role
        );

        prompt.push_str(&format!("Scenario: {}\n", self.title));
        if let Some(facts) = &persona.initial_facts {
            prompt.push_str(&format!("Initial facts: {}\n", facts));
        }
        prompt.push_str(&format!(
            "Customer: {} ({} tone). Backstory: {}\n",
            persona.name, persona.tone, persona.backstory
        ));

        if !persona.goal_questions.is_empty() {
            prompt.push_str("\nThe customer needed answers to:\n");
            for (index, question) in persona.goal_questions.iter().enumerate() {
                let status = match self.goal_flags.and_then(|flags| flags.get(index)) {
                    Some(true) => " [answered]",
                    Some(false) => " [not answered]",
                    None => "",
                };
                prompt.push_str(&format!("{}. {}{}\n", index + 1, question, status));
            }
        }

        prompt.push_str("\n--- Transcript ---\n");
        if self.lines.is_empty() {
            prompt.push_str("(no messages)\n");
        }
        for line in self.lines {
            prompt.push_str(&format!("{}: {}\n", line.role, line.text));
        }
        prompt.push_str("------------------\n\n");

        prompt.push_str("Write your evaluation with these sections:\n");
        for (index, section) in FEEDBACK_SECTIONS.iter().enumerate() {
            prompt.push_str(&format!("{}. **{}**\n", index + 1, section));
        }
        prompt.push_str("Be specific and quote the trainee where it helps.");
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona() -> Persona {
        Persona {
            name: "Dana".to_string(),
            backstory: "Ordered a sofa.".to_string(),
            tone: "frustrated".to_string(),
            initial_facts: Some("Order #4411 is late.".to_string()),
            goal_questions: vec!["When will it arrive?".to_string(), "Refund?".to_string()],
            counterpart_role: "Customer Service".to_string(),
        }
    }

    #[test]
    fn prompt_contains_all_sections_and_transcript() {
        let persona = persona();
        let lines = vec![
            FeedbackLine {
                role: "Dana".to_string(),
                text: "Where is my sofa?".to_string(),
            },
            FeedbackLine {
                role: "Customer Service".to_string(),
                text: "It ships Monday.".to_string(),
            },
        ];
        let prompt = FeedbackPrompt {
            title: "Late Delivery",
            persona: &persona,
            goal_flags: Some(&[true, false][..]),
            lines: &lines,
        }
        .render();

        for section in FEEDBACK_SECTIONS {
            assert!(prompt.contains(section), "missing {}", section);
        }
        assert!(prompt.contains("Scenario: Late Delivery"));
        assert!(prompt.contains("Initial facts: Order #4411 is late."));
        assert!(prompt.contains("1. When will it arrive? [answered]"));
        assert!(prompt.contains("2. Refund? [not answered]"));
        assert!(prompt.contains("Customer Service: It ships Monday."));
    }

    #[test]
    fn client_history_has_no_goal_status() {
        let persona = persona();
        let prompt = FeedbackPrompt {
            title: "Late Delivery",
            persona: &persona,
            goal_flags: None,
            lines: &[],
        }
        .render();

        assert!(prompt.contains("1. When will it arrive?\n"));
        assert!(prompt.contains("(no messages)"));
    }

    #[test]
    fn transcript_lines_use_persona_and_counterpart_labels() {
        let persona = persona();
        let mut transcript = Transcript::new();
        transcript.push(Speaker::Persona, "Hello");
        transcript.push(Speaker::Agent, "Hi there");

        let lines = FeedbackLine::from_transcript(&transcript, &persona);
        assert_eq!(lines[0].role, "Dana");
        assert_eq!(lines[1].role, "Customer Service");
    }
}
