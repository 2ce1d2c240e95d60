//! AI Provider Adapters.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models over the REST API
//! - `MockAIProvider` - Configurable mock for testing
//! - `CompletionOracle` - Wraps a provider and converts failures to fallback text

mod completion_oracle;
mod gemini_provider;
mod mock_provider;

pub use completion_oracle::{
    CompletionOracle, OracleReply, OracleSettings, FALLBACK_NOT_CONFIGURED, FALLBACK_UNAVAILABLE,
};
pub use gemini_provider::{GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
