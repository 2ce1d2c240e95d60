//! Application router - every HTTP module behind one set of layers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::ai::CompletionOracle;
use crate::application::handlers::{
    AddScenarioHandler, EndSessionHandler, ExportScenariosHandler, GenerateCrisisHandler,
    GenerateFeedbackHandler, GetSessionHandler, ListScenariosHandler, ReloadScenariosHandler,
    SendMessageHandler, StartRoleplayHandler,
};
use crate::ports::{ScenarioStore, SessionRegistry};

use super::crisis::{crisis_routes, CrisisHandlers};
use super::feedback::{feedback_routes, FeedbackHandlers};
use super::roleplay::{roleplay_routes, RoleplayHandlers};
use super::scenario::{scenario_routes, ScenarioHandlers};

/// Shared dependencies of every handler.
#[derive(Clone)]
pub struct AppServices {
    pub scenarios: Arc<dyn ScenarioStore>,
    pub sessions: Arc<dyn SessionRegistry>,
    pub oracle: CompletionOracle,
}

/// Transport settings for the router.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Served at `/`.
    pub index_file: PathBuf,
    pub request_timeout: Duration,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            index_file: PathBuf::from("frontend/index.html"),
            request_timeout: Duration::from_secs(60),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ai_configured: bool,
    pub scenarios: usize,
}

#[derive(Clone)]
struct HealthState {
    scenarios: Arc<dyn ScenarioStore>,
    oracle: CompletionOracle,
}

/// GET /health - Liveness plus credential and catalog status
async fn health(State(state): State<HealthState>) -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        ai_configured: state.oracle.is_configured(),
        scenarios: state.scenarios.count().await,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Builds the full application router.
pub fn app_router(services: AppServices, settings: &RouterSettings) -> Router {
    let starter = StartRoleplayHandler::new(
        services.scenarios.clone(),
        services.sessions.clone(),
        services.oracle.clone(),
    );
    let sender = SendMessageHandler::new(
        services.sessions.clone(),
        starter.clone(),
        services.oracle.clone(),
    );

    let roleplay = RoleplayHandlers::new(
        Arc::new(starter),
        Arc::new(sender),
        Arc::new(GetSessionHandler::new(services.sessions.clone())),
        Arc::new(EndSessionHandler::new(services.sessions.clone())),
    );
    let scenarios = ScenarioHandlers::new(
        Arc::new(ListScenariosHandler::new(services.scenarios.clone())),
        Arc::new(ExportScenariosHandler::new(services.scenarios.clone())),
        Arc::new(AddScenarioHandler::new(services.scenarios.clone())),
        Arc::new(ReloadScenariosHandler::new(services.scenarios.clone())),
    );
    let feedback = FeedbackHandlers::new(Arc::new(GenerateFeedbackHandler::new(
        services.scenarios.clone(),
        services.sessions.clone(),
        services.oracle.clone(),
    )));
    let crisis = CrisisHandlers::new(Arc::new(GenerateCrisisHandler::new(
        services.oracle.clone(),
    )));

    let health_routes = Router::new().route("/health", get(health)).with_state(HealthState {
        scenarios: services.scenarios,
        oracle: services.oracle,
    });

    Router::new()
        .route_service("/", ServeFile::new(&settings.index_file))
        .merge(health_routes)
        .merge(roleplay_routes(roleplay))
        .merge(scenario_routes(scenarios))
        .merge(feedback_routes(feedback))
        .merge(crisis_routes(crisis))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_accepts_explicit_origins() {
        // Invalid header values are dropped rather than panicking.
        let _layer = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
    }

    #[test]
    fn default_settings_serve_frontend_index() {
        let settings = RouterSettings::default();
        assert_eq!(settings.index_file, PathBuf::from("frontend/index.html"));
    }
}
