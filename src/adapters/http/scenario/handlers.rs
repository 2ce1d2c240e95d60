//! HTTP handlers for scenario endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::adapters::http::error::{scenario_error_response, ErrorResponse};
use crate::application::handlers::scenario::{
    AddScenarioCommand, AddScenarioHandler, ExportScenariosHandler, ListScenariosHandler,
    ReloadScenariosHandler,
};
use crate::domain::scenario::ScenarioError;
use crate::ports::ScenarioStoreError;

use super::dto::{
    parse_scenario, AddScenarioResponse, ReloadScenariosResponse, ScenarioSummaryResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ScenarioHandlers {
    list_handler: Arc<ListScenariosHandler>,
    export_handler: Arc<ExportScenariosHandler>,
    add_handler: Arc<AddScenarioHandler>,
    reload_handler: Arc<ReloadScenariosHandler>,
}

impl ScenarioHandlers {
    pub fn new(
        list_handler: Arc<ListScenariosHandler>,
        export_handler: Arc<ExportScenariosHandler>,
        add_handler: Arc<AddScenarioHandler>,
        reload_handler: Arc<ReloadScenariosHandler>,
    ) -> Self {
        Self {
            list_handler,
            export_handler,
            add_handler,
            reload_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /scenarios - Id and title of every scenario
pub async fn list_scenarios(State(handlers): State<ScenarioHandlers>) -> Response {
    let response: Vec<ScenarioSummaryResponse> = handlers
        .list_handler
        .handle()
        .await
        .into_iter()
        .map(ScenarioSummaryResponse::from)
        .collect();
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /export_scenarios - The full scenario document
pub async fn export_scenarios(State(handlers): State<ScenarioHandlers>) -> Response {
    let scenarios = handlers.export_handler.handle().await;
    (StatusCode::OK, Json(scenarios)).into_response()
}

/// POST /add_scenario - Append a scenario to the document
pub async fn add_scenario(
    State(handlers): State<ScenarioHandlers>,
    Json(body): Json<Value>,
) -> Response {
    let scenario = match parse_scenario(body) {
        Ok(scenario) => scenario,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(message)),
            )
                .into_response()
        }
    };

    match handlers.add_handler.handle(AddScenarioCommand { scenario }).await {
        Ok(id) => {
            let response = AddScenarioResponse { id: id.to_string() };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// POST /reload_scenarios - Re-read the scenario document
pub async fn reload_scenarios(State(handlers): State<ScenarioHandlers>) -> Response {
    match handlers.reload_handler.handle().await {
        Ok(scenarios) => {
            (StatusCode::OK, Json(ReloadScenariosResponse { scenarios })).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_store_error(error: ScenarioStoreError) -> Response {
    match error {
        ScenarioStoreError::Scenario(e) => match e {
            // A rejected submission is the caller's mistake, not ours.
            ScenarioError::Incomplete { .. } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response(),
            other => scenario_error_response(other),
        },
        ScenarioStoreError::Io(msg) | ScenarioStoreError::Parse(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ScenarioId;

    #[test]
    fn incomplete_submission_maps_to_400() {
        let id = ScenarioId::new("5").unwrap();
        let response = handle_store_error(ScenarioError::incomplete(&id, "title").into());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_maps_to_409() {
        let id = ScenarioId::new("5").unwrap();
        let response = handle_store_error(ScenarioError::AlreadyExists(id).into());
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn io_failure_maps_to_500() {
        let response = handle_store_error(ScenarioStoreError::Io("disk full".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
