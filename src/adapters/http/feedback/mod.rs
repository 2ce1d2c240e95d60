//! HTTP adapter for roleplay feedback.

mod dto;
mod handlers;
mod routes;

pub use dto::{FeedbackRequest, FeedbackResponse};
pub use handlers::FeedbackHandlers;
pub use routes::feedback_routes;
