//! DTOs for the crisis endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /generate_crisis`. Missing fields are reported by the
/// handler rather than rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateCrisisRequest {
    #[serde(default)]
    pub client_industry: String,
    #[serde(default)]
    pub crisis_type: String,
    #[serde(default)]
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateCrisisResponse {
    pub scenario: String,
    pub degraded: bool,
}
