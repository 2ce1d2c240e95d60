//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - text generation by a hosted model
//! - `ScenarioStore` - the scenario document
//! - `SessionRegistry` - live roleplay sessions

mod ai_provider;
mod scenario_store;
mod session_registry;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use scenario_store::{ScenarioStore, ScenarioStoreError};
pub use session_registry::{Registration, SessionRegistry, SharedSession};
