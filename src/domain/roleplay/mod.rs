//! Roleplay module - the persona-driven conversation.
//!
//! - `transcript` - ordered record of turns
//! - `goals` - goal matching and the answered-goal tracker
//! - `prompt` - prompt text for each persona message
//! - `session` - the session aggregate and its two-phase turn

mod errors;
mod goals;
mod prompt;
mod session;
mod transcript;

pub use errors::RoleplayError;
pub use goals::{GoalMatcher, GoalTracker, KeywordGoalMatcher};
pub use prompt::{NextAction, TurnPrompt, CLOSING_DIRECTIVE};
pub use session::{PendingTurn, RoleplaySession, SessionPhase, TurnOutcome};
pub use transcript::{Speaker, Transcript, Turn};
