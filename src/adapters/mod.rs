//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Gemini provider, mock provider and the completion oracle
//! - `storage` - scenario document and in-memory session registry
//! - `http` - axum routes over the application handlers

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{CompletionOracle, GeminiConfig, GeminiProvider, MockAIProvider, OracleSettings};
pub use http::{app_router, AppServices, RouterSettings};
pub use storage::{InMemorySessionRegistry, JsonScenarioStore};
