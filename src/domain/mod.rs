//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, validation errors)
//! - `scenario` - Scenario records and the personas built from them
//! - `roleplay` - Conversation session, goal tracking and prompt assembly
//! - `feedback` - Evaluation prompt for a roleplay transcript
//! - `crisis` - PR crisis brief requests

pub mod crisis;
pub mod feedback;
pub mod foundation;
pub mod roleplay;
pub mod scenario;
