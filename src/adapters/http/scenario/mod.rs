//! HTTP adapter for scenario catalog endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AddScenarioResponse, ReloadScenariosResponse, ScenarioSummaryResponse};
pub use handlers::ScenarioHandlers;
pub use routes::scenario_routes;
