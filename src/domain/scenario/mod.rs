//! Scenario module - persona and goal definitions loaded from the
//! scenario document.

mod errors;
mod scenario;

pub use errors::ScenarioError;
pub use scenario::{ChatActor, Persona, Scenario, ScenarioSummary, DEFAULT_COUNTERPART_ROLE};
