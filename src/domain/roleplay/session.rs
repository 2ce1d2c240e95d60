//! Roleplay session aggregate.
//!
//! A turn is two-phase: `prepare_turn` works on copies and produces the
//! prompt, `commit_turn` applies the result once the model has replied.
//! If the model call fails the pending turn is dropped and the session is
//! left exactly as it was.

use serde::Serialize;

use crate::domain::foundation::{ScenarioId, SessionId, Timestamp};
use crate::domain::scenario::Persona;

use super::{
    GoalMatcher, GoalTracker, NextAction, RoleplayError, Speaker, Transcript, TurnPrompt,
};

/// Where the conversation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "goal", rename_all = "snake_case")]
pub enum SessionPhase {
    /// The persona is pursuing the goal at this index.
    AwaitingGoal(usize),
    /// Every goal has been answered.
    Concluded,
}

#[derive(Debug, Clone)]
pub struct RoleplaySession {
    id: SessionId,
    scenario_id: ScenarioId,
    persona: Persona,
    transcript: Transcript,
    goals: GoalTracker,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// A turn that has been matched and prompted but not yet applied.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    human_text: String,
    goals: GoalTracker,
    newly_answered: Vec<usize>,
    prompt: String,
    base_len: usize,
}

impl PendingTurn {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Flags as they would be after this turn commits.
    pub fn goal_flags(&self) -> &[bool] {
        self.goals.flags()
    }
}

/// Result of a committed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: String,
    pub goal_flags: Vec<bool>,
    pub newly_answered: Vec<usize>,
    pub concluded: bool,
}

impl RoleplaySession {
    /// Prompt for the persona's first message.
    pub fn opening_prompt(persona: &Persona) -> String {
        TurnPrompt::opening(persona).render()
    }

    /// Creates a session whose transcript starts with the persona's opening.
    pub fn open(
        id: SessionId,
        scenario_id: ScenarioId,
        persona: Persona,
        opening_reply: impl Into<String>,
    ) -> Result<Self, RoleplayError> {
        let opening_reply = opening_reply.into();
        if opening_reply.trim().is_empty() {
            return Err(RoleplayError::EmptyReply);
        }

        let mut transcript = Transcript::new();
        transcript.push(Speaker::Persona, opening_reply);
        let now = Timestamp::now();

        Ok(Self {
            id,
            scenario_id,
            goals: GoalTracker::new(persona.goal_questions.len()),
            persona,
            transcript,
            created_at: now,
            updated_at: now,
        })
    }

    /// Matches goals and builds the prompt for a trainee message.
    ///
    /// Does not modify the session.
    pub fn prepare_turn(
        &self,
        human_text: &str,
        matcher: &dyn GoalMatcher,
    ) -> Result<PendingTurn, RoleplayError> {
        let human_text = human_text.trim();
        if human_text.is_empty() {
            return Err(RoleplayError::EmptyMessage);
        }

        let mut goals = self.goals.clone();
        let newly_answered = goals.record_reply(&self.persona.goal_questions, human_text, matcher);

        let action = match goals
            .advance()
            .and_then(|index| self.persona.goal_questions.get(index))
        {
            Some(question) => NextAction::Ask(question),
            None => NextAction::Close,
        };
        let prompt = TurnPrompt::reply(&self.persona, &self.transcript, human_text, action).render();

        Ok(PendingTurn {
            human_text: human_text.to_string(),
            goals,
            newly_answered,
            prompt,
            base_len: self.transcript.len(),
        })
    }

    /// Applies a prepared turn with the model's reply.
    pub fn commit_turn(
        &mut self,
        pending: PendingTurn,
        reply: impl Into<String>,
    ) -> Result<TurnOutcome, RoleplayError> {
        if pending.base_len != self.transcript.len() {
            return Err(RoleplayError::StaleTurn(self.id.clone()));
        }
        let reply = reply.into();
        if reply.trim().is_empty() {
            return Err(RoleplayError::EmptyReply);
        }

        self.transcript.push(Speaker::Agent, pending.human_text);
        self.transcript.push(Speaker::Persona, reply.clone());
        self.goals = pending.goals;
        self.updated_at = Timestamp::now();

        Ok(TurnOutcome {
            reply,
            goal_flags: self.goals.flags().to_vec(),
            newly_answered: pending.newly_answered,
            concluded: self.is_concluded(),
        })
    }

    /// Rejects use of the session under a different scenario.
    pub fn ensure_scenario(&self, requested: &ScenarioId) -> Result<(), RoleplayError> {
        if &self.scenario_id == requested {
            Ok(())
        } else {
            Err(RoleplayError::ScenarioMismatch {
                session: self.id.clone(),
                bound: self.scenario_id.clone(),
                requested: requested.clone(),
            })
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match self.goals.pending_goal() {
            Some(index) => SessionPhase::AwaitingGoal(index),
            None => SessionPhase::Concluded,
        }
    }

    pub fn is_concluded(&self) -> bool {
        self.goals.is_complete()
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn scenario_id(&self) -> &ScenarioId {
        &self.scenario_id
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn goal_flags(&self) -> &[bool] {
        self.goals.flags()
    }

    /// Most recent persona message; present from the opening on.
    pub fn last_persona_text(&self) -> Option<&str> {
        self.transcript
            .turns()
            .iter()
            .rev()
            .find(|turn| turn.speaker == Speaker::Persona)
            .map(|turn| turn.text.as_str())
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
