//! Prompt assembly for persona turns.

use crate::domain::scenario::Persona;

use super::Transcript;

/// Directive sent once every goal question has been answered.
pub const CLOSING_DIRECTIVE: &str =
    "Your next action: You have received answers to all your questions. End the chat politely and professionally.\n";

const RESPONSE_CUE: &str = "Your response (as the customer):";

/// What the persona should do in its next message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction<'a> {
    /// First message of the session; optionally leads into a goal question.
    Open(Option<&'a str>),
    Ask(&'a str),
    Close,
}

/// Builds the text prompt for one persona message.
#[derive(Debug)]
pub struct TurnPrompt<'a> {
    persona: &'a Persona,
    history: Option<&'a Transcript>,
    latest: Option<&'a str>,
    action: NextAction<'a>,
}

impl<'a> TurnPrompt<'a> {
    pub fn opening(persona: &'a Persona) -> Self {
        let first = persona.goal_questions.first().map(String::as_str);
        Self {
            persona,
            history: None,
            latest: None,
            action: NextAction::Open(first),
        }
    }

    pub fn reply(
        persona: &'a Persona,
        history: &'a Transcript,
        latest: &'a str,
        action: NextAction<'a>,
    ) -> Self {
        Self {
            persona,
            history: Some(history),
            latest: Some(latest),
            action,
        }
    }

    pub fn render(&self) -> String {
        let persona = self.persona;
        let mut prompt = format!(
            "You are a customer named '{}'. Your backstory is: '{}'.\n",
            persona.name, persona.backstory
        );

        if let Some(facts) = &persona.initial_facts {
            prompt.push_str(&format!("Facts about your situation: {}\n", facts));
        }
        if !persona.goal_questions.is_empty() {
            prompt.push_str(&format!(
                "Your current goal is to get answers to the following questions: {}.\n",
                persona.goal_questions.join("; ")
            ));
        }
        prompt.push_str(&format!(
            "Maintain a {} tone throughout the conversation.\n",
            persona.tone
        ));
        prompt.push_str(&format!(
            "Simulate a conversation with a {} representative. Your responses should be concise and directly address the conversation flow.\n",
            persona.counterpart_role
        ));

        if let Some(history) = self.history.filter(|h| !h.is_empty()) {
            prompt.push_str("\n--- Conversation History ---\n");
            prompt.push_str(&history.render(&persona.name, &persona.counterpart_role));
            prompt.push_str("--------------------------\n");
        }
        if let Some(latest) = self.latest {
            prompt.push_str(&format!("{}: {}\n", persona.counterpart_role, latest));
        }

        match self.action {
            NextAction::Open(Some(question)) => prompt.push_str(&format!(
                "Your next action: Start the conversation by explaining your situation, then ask: '{}'.\n",
                question
            )),
            NextAction::Open(None) => prompt.push_str(
                "Your next action: Start the conversation by explaining your situation.\n",
            ),
            NextAction::Ask(question) => {
                prompt.push_str(&format!(
                    "Your next action: Ask the question: '{}'.\n",
                    question
                ));
                prompt.push_str(
                    "Formulate your response as the customer asking this specific question, maintaining your tone.\n",
                );
            }
            NextAction::Close => prompt.push_str(CLOSING_DIRECTIVE),
        }

        prompt.push_str(RESPONSE_CUE);
        prompt
    }
}
