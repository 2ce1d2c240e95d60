//! PR crisis brief request and its generation prompt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrisisError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid severity '{0}'. Expected one of: low, medium, high, critical")]
    InvalidSeverity(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CrisisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(CrisisError::InvalidSeverity(s.to_string())),
        }
    }
}

/// Validated crisis generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrisisRequest {
    client_industry: String,
    crisis_type: String,
    severity: Severity,
}

impl CrisisRequest {
    pub fn new(
        client_industry: &str,
        crisis_type: &str,
        severity: &str,
    ) -> Result<Self, CrisisError> {
        let client_industry = client_industry.trim();
        if client_industry.is_empty() {
            return Err(CrisisError::MissingField("client_industry"));
        }
        let crisis_type = crisis_type.trim();
        if crisis_type.is_empty() {
            return Err(CrisisError::MissingField("crisis_type"));
        }
        if severity.trim().is_empty() {
            return Err(CrisisError::MissingField("severity"));
        }

        Ok(Self {
            client_industry: client_industry.to_string(),
            crisis_type: crisis_type.to_string(),
            severity: severity.parse()?,
        })
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn prompt(&self) -> String {
        format!(
            "Generate a highly realistic and detailed PR crisis event based on the following parameters:\n\
             \n\
             Client/Industry: {}\n\
             Crisis Type: {}\n\
             Severity: {}\n\
             \n\
             The output should include the following sections:\n\
             \n\
             1. **Crisis Title:** A concise and impactful title for the crisis.\n\
             2. **Initial Facts:**\n\
             \x20   * Date and time of the initial event.\n\
             \x20   * Location of the initial event.\n\
             \x20   * A brief, factual description of what happened, including any known causes or triggers.\n\
             \x20   * Any initial impact or consequences.\n\
             3. **Key Actors Involved:**\n\
             \x20   * The company or client name (invent a realistic one if none is given).\n\
             \x20   * Individuals or departments inside the company who are directly involved.\n\
             \x20   * External parties such as affected people, regulators, competitors or activist groups.\n\
             4. **Immediate Media Implications:**\n\
             \x20   * How the news broke.\n\
             \x20   * Initial sentiment on social media and in traditional news.\n\
             \x20   * Key hashtags or trending topics.\n\
             \x20   * Example headlines, both factual and sensationalized.\n\
             \x20   * Immediate calls to action or demands from the public or stakeholders.\n\
             5. **Severity Impact Justification:** Briefly explain how the scenario matches the '{}' severity level in terms of reputational damage, financial loss, legal exposure and public trust.\n",
            self.client_industry, self.crisis_type, self.severity, self.severity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!(" critical ".parse::<Severity>().unwrap(), Severity::Critical);
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let err = CrisisRequest::new("tech startup", "data breach", "apocalyptic").unwrap_err();
        assert_eq!(err, CrisisError::InvalidSeverity("apocalyptic".to_string()));
    }

    #[test]
    fn all_fields_are_required() {
        assert_eq!(
            CrisisRequest::new(" ", "recall", "low").unwrap_err(),
            CrisisError::MissingField("client_industry")
        );
        assert_eq!(
            CrisisRequest::new("food", "", "low").unwrap_err(),
            CrisisError::MissingField("crisis_type")
        );
        assert_eq!(
            CrisisRequest::new("food", "recall", "").unwrap_err(),
            CrisisError::MissingField("severity")
        );
    }

    #[test]
    fn prompt_lists_parameters_and_sections() {
        let request = CrisisRequest::new("healthcare", "data breach", "High").unwrap();
        let prompt = request.prompt();

        assert!(prompt.contains("Client/Industry: healthcare"));
        assert!(prompt.contains("Crisis Type: data breach"));
        assert!(prompt.contains("Severity: high"));
        for section in [
            "Crisis Title",
            "Initial Facts",
            "Key Actors Involved",
            "Immediate Media Implications",
            "Severity Impact Justification",
        ] {
            assert!(prompt.contains(section), "missing {}", section);
        }
    }
}
