//! Feedback handlers.

mod generate_feedback;

pub use generate_feedback::{FeedbackResult, GenerateFeedbackCommand, GenerateFeedbackHandler};
