//! HTTP routes for scenario endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    add_scenario, export_scenarios, list_scenarios, reload_scenarios, ScenarioHandlers,
};

pub fn scenario_routes(handlers: ScenarioHandlers) -> Router {
    Router::new()
        .route("/scenarios", get(list_scenarios))
        .route("/export_scenarios", get(export_scenarios))
        .route("/add_scenario", post(add_scenario))
        .route("/reload_scenarios", post(reload_scenarios))
        .with_state(handlers)
}
