//! Storage Adapters
//!
//! ## Available Adapters
//!
//! - **JsonScenarioStore** - Scenario catalog backed by a JSON document
//! - **InMemorySessionRegistry** - Bounded, expiring registry of live sessions
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemorySessionRegistry, JsonScenarioStore};
//!
//! let scenarios = JsonScenarioStore::load("frontend/scenarios.json").await?;
//! let sessions = InMemorySessionRegistry::new(1_000, Duration::from_secs(3_600));
//! ```

mod in_memory_session_registry;
mod json_scenario_store;

pub use in_memory_session_registry::InMemorySessionRegistry;
pub use json_scenario_store::{JsonScenarioStore, ScenarioCatalog};
