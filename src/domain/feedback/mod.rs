//! Feedback module - evaluation prompt for a finished or ongoing roleplay.

mod prompt;

pub use prompt::{FeedbackLine, FeedbackPrompt, FEEDBACK_SECTIONS};
