//! Live session registry limits

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    /// Maximum number of live sessions
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Seconds a session may sit unused before it is dropped
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_secs: u64,

    /// Seconds between background prune passes
    #[serde(default = "default_prune_interval")]
    pub prune_interval_secs: u64,
}

impl SessionsConfig {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }

    pub fn prune_interval(&self) -> Duration {
        Duration::from_secs(self.prune_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capacity == 0 {
            return Err(ValidationError::InvalidSessionCapacity);
        }
        if self.idle_ttl_secs == 0 || self.prune_interval_secs == 0 {
            return Err(ValidationError::InvalidSessionTiming);
        }
        Ok(())
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            idle_ttl_secs: default_idle_ttl(),
            prune_interval_secs: default_prune_interval(),
        }
    }
}

fn default_capacity() -> usize {
    1_000
}

fn default_idle_ttl() -> u64 {
    3_600
}

fn default_prune_interval() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults() {
        let config = SessionsConfig::default();
        assert_eq!(config.capacity, 1_000);
        assert_eq!(config.idle_ttl(), Duration::from_secs(3_600));
        assert_eq!(config.prune_interval(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let config = SessionsConfig {
            capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionCapacity));

        let config = SessionsConfig {
            idle_ttl_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionTiming));
    }
}
