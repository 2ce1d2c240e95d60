//! Scenario document and static frontend locations

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ScenariosConfig {
    /// JSON array of scenario records
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Directory holding `index.html`
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,
}

impl ScenariosConfig {
    pub fn index_file(&self) -> PathBuf {
        self.frontend_dir.join("index.html")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("scenarios.path"));
        }
        Ok(())
    }
}

impl Default for ScenariosConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            frontend_dir: default_frontend_dir(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("frontend/scenarios.json")
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_frontend() {
        let config = ScenariosConfig::default();
        assert_eq!(config.path, PathBuf::from("frontend/scenarios.json"));
        assert_eq!(config.index_file(), PathBuf::from("frontend/index.html"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let config = ScenariosConfig {
            path: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
