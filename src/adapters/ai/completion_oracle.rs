//! Completion oracle - turns a prompt into text, never into an error.
//!
//! Every failure mode of the underlying provider is logged and replaced
//! with a fixed apology so callers can always show something to the user.

use std::sync::Arc;

use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Shown when no credential was configured at startup.
pub const FALLBACK_NOT_CONFIGURED: &str = "AI service is not available (API key missing).";

/// Shown when the provider call fails or returns nothing.
pub const FALLBACK_UNAVAILABLE: &str =
    "I'm sorry, I'm having trouble connecting to the AI right now. Please try again later.";

/// Text produced by the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleReply {
    /// Model output.
    Generated(String),
    /// Fixed fallback text; nothing was generated.
    Fallback(&'static str),
}

impl OracleReply {
    /// Never empty.
    pub fn text(&self) -> &str {
        match self {
            OracleReply::Generated(text) => text,
            OracleReply::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            OracleReply::Generated(text) => text,
            OracleReply::Fallback(text) => text.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, OracleReply::Fallback(_))
    }
}

/// Generation settings applied to every request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OracleSettings {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Clone)]
pub struct CompletionOracle {
    provider: Option<Arc<dyn AIProvider>>,
    settings: OracleSettings,
}

impl CompletionOracle {
    pub fn new(provider: Arc<dyn AIProvider>, settings: OracleSettings) -> Self {
        Self {
            provider: Some(provider),
            settings,
        }
    }

    /// Oracle that always answers with `FALLBACK_NOT_CONFIGURED`.
    pub fn unconfigured() -> Self {
        Self {
            provider: None,
            settings: OracleSettings::default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn complete(&self, prompt: &str, metadata: RequestMetadata) -> OracleReply {
        let Some(provider) = &self.provider else {
            tracing::warn!(purpose = metadata.purpose, "AI provider not configured; using fallback text");
            return OracleReply::Fallback(FALLBACK_NOT_CONFIGURED);
        };

        let session_id = metadata
            .session_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();
        let purpose = metadata.purpose;
        let trace_id = metadata.trace_id.clone();

        let mut request = CompletionRequest::new(metadata).with_message(MessageRole::User, prompt);
        if let Some(temperature) = self.settings.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.settings.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        tracing::debug!(
            session_id = %session_id,
            purpose,
            trace_id = %trace_id,
            prompt_tokens = provider.estimate_tokens(prompt),
            "Requesting completion"
        );

        match provider.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                tracing::debug!(
                    session_id = %session_id,
                    purpose,
                    total_tokens = response.usage.total_tokens,
                    "Completion received"
                );
                OracleReply::Generated(response.content.trim().to_string())
            }
            Ok(_) => {
                tracing::warn!(session_id = %session_id, purpose, "Model returned an empty reply");
                OracleReply::Fallback(FALLBACK_UNAVAILABLE)
            }
            Err(err) => {
                tracing::error!(
                    session_id = %session_id,
                    purpose,
                    trace_id = %trace_id,
                    error = %err,
                    "Completion failed"
                );
                OracleReply::Fallback(FALLBACK_UNAVAILABLE)
            }
        }
    }
}

impl std::fmt::Debug for CompletionOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionOracle")
            .field(
                "provider",
                &self.provider.as_ref().map(|p| p.provider_info().name),
            )
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    fn metadata() -> RequestMetadata {
        RequestMetadata::new("turn", "trace")
    }

    #[tokio::test]
    async fn generated_reply_is_trimmed() {
        let mock = MockAIProvider::new().with_response("  Hello!\n");
        let oracle = CompletionOracle::new(Arc::new(mock), OracleSettings::default());

        assert_eq!(
            oracle.complete("prompt", metadata()).await,
            OracleReply::Generated("Hello!".to_string())
        );
    }

    #[tokio::test]
    async fn unconfigured_oracle_reports_missing_key() {
        let reply = CompletionOracle::unconfigured()
            .complete("prompt", metadata())
            .await;

        assert_eq!(reply, OracleReply::Fallback(FALLBACK_NOT_CONFIGURED));
        assert!(!reply.text().is_empty());
    }

    #[tokio::test]
    async fn provider_error_becomes_fallback() {
        let mock = MockAIProvider::new().with_error(MockError::Network {
            message: "reset".to_string(),
        });
        let oracle = CompletionOracle::new(Arc::new(mock), OracleSettings::default());

        let reply = oracle.complete("prompt", metadata()).await;
        assert!(reply.is_fallback());
        assert_eq!(reply.text(), FALLBACK_UNAVAILABLE);
    }

    #[tokio::test]
    async fn empty_reply_counts_as_failure() {
        let mock = MockAIProvider::new().with_response("   ");
        let oracle = CompletionOracle::new(Arc::new(mock), OracleSettings::default());

        assert_eq!(
            oracle.complete("prompt", metadata()).await,
            OracleReply::Fallback(FALLBACK_UNAVAILABLE)
        );
    }

    #[tokio::test]
    async fn settings_and_prompt_reach_provider() {
        let mock = MockAIProvider::new();
        let oracle = CompletionOracle::new(
            Arc::new(mock.clone()),
            OracleSettings {
                temperature: Some(0.4),
                max_tokens: Some(300),
            },
        );

        oracle.complete("Say hi", metadata()).await;

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages[0].content, "Say hi");
        assert_eq!(calls[0].temperature, Some(0.4));
        assert_eq!(calls[0].max_tokens, Some(300));
    }
}
