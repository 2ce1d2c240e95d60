//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Variable consulted when no key is set under the application prefix.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// REST base URL up to `/models`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    pub temperature: Option<f32>,

    pub max_tokens: Option<u32>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured key, else the `GOOGLE_API_KEY` environment variable.
    pub fn api_key(&self) -> Option<Secret<String>> {
        self.resolve_api_key(std::env::var(GOOGLE_API_KEY_VAR).ok())
    }

    fn resolve_api_key(&self, fallback: Option<String>) -> Option<Secret<String>> {
        self.gemini_api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .cloned()
            .or_else(|| {
                fallback
                    .filter(|key| !key.trim().is_empty())
                    .map(Secret::new)
            })
    }

    /// Validate AI configuration
    ///
    /// A missing key is not an error: the service runs with fallback text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ai.model"));
        }
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ai.base_url"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ValidationError::InvalidTemperature);
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            temperature: None,
            max_tokens: None,
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_configured_key_wins_over_fallback() {
        let config = AiConfig {
            gemini_api_key: Some(Secret::new("configured".to_string())),
            ..Default::default()
        };
        let key = config.resolve_api_key(Some("from-env".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "configured");
    }

    #[test]
    fn test_fallback_key_used_when_unset_or_blank() {
        let config = AiConfig {
            gemini_api_key: Some(Secret::new("  ".to_string())),
            ..Default::default()
        };
        let key = config.resolve_api_key(Some("from-env".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "from-env");

        assert!(config.resolve_api_key(Some(String::new())).is_none());
        assert!(AiConfig::default().resolve_api_key(None).is_none());
    }

    #[test]
    fn test_key_is_redacted_in_debug() {
        let config = AiConfig {
            gemini_api_key: Some(Secret::new("super-secret".to_string())),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = AiConfig {
            temperature: Some(3.5),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));

        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAiTimeout));

        let config = AiConfig {
            model: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
