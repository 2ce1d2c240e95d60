use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use persona_trainer::adapters::ai::{
    CompletionOracle, GeminiConfig, GeminiProvider, OracleSettings,
};
use persona_trainer::adapters::http::{app_router, AppServices, RouterSettings};
use persona_trainer::adapters::storage::{InMemorySessionRegistry, JsonScenarioStore};
use persona_trainer::config::{AppConfig, AiConfig};
use persona_trainer::ports::SessionRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let oracle = build_oracle(&config.ai);
    let scenarios = Arc::new(JsonScenarioStore::load(&config.scenarios.path).await?);
    let sessions = Arc::new(InMemorySessionRegistry::new(
        config.sessions.capacity,
        config.sessions.idle_ttl(),
    ));

    spawn_prune_task(sessions.clone(), config.sessions.prune_interval());

    let settings = RouterSettings {
        index_file: config.scenarios.index_file(),
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = app_router(
        AppServices {
            scenarios,
            sessions,
            oracle,
        },
        &settings,
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Persona trainer listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().compact().with_env_filter(filter).init();
    }
}

fn build_oracle(ai: &AiConfig) -> CompletionOracle {
    let Some(key) = ai.api_key() else {
        tracing::warn!("No Gemini API key configured; replies will use fallback text");
        return CompletionOracle::unconfigured();
    };

    let gemini = GeminiConfig::from_secret(key)
        .with_model(ai.model.clone())
        .with_base_url(ai.base_url.clone())
        .with_timeout(ai.timeout())
        .with_max_retries(ai.max_retries);

    match GeminiProvider::new(gemini) {
        Ok(provider) => {
            tracing::info!(model = %ai.model, "Gemini provider configured");
            CompletionOracle::new(
                Arc::new(provider),
                OracleSettings {
                    temperature: ai.temperature,
                    max_tokens: ai.max_tokens,
                },
            )
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to build Gemini client; replies will use fallback text");
            CompletionOracle::unconfigured()
        }
    }
}

fn spawn_prune_task(sessions: Arc<InMemorySessionRegistry>, every: std::time::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let pruned = sessions.prune_expired().await;
            if pruned > 0 {
                tracing::debug!(pruned, "Expired roleplay sessions removed");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
