//! Pokémon classifier server
//!
//! Loads the model artifacts once, then serves the form page and API
//! until interrupted.

use anyhow::Result;
use classifier_lib::{
    observability::{ClassifierMetrics, StructuredLogger},
    ArtifactStore, HealthRegistry, TypePredictor,
};
use pokedex_server::{api, AppState, Background, PageRenderer, ServerConfig};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting pokedex-server");

    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        artifact_dir = %config.artifact_dir.display(),
        "Server configured"
    );

    let logger = StructuredLogger::new(&config.instance);
    logger.log_startup(SERVER_VERSION, &config.artifact_dir.display().to_string());

    // Artifacts are loaded once; failures leave the server in degraded mode
    let artifacts = Arc::new(ArtifactStore::new(&config.artifact_dir).load());
    logger.log_artifacts(&artifacts);

    let metrics = ClassifierMetrics::new();
    metrics.set_artifacts(&artifacts);

    let background = match Background::load(&config.background_path) {
        Ok(background) => Some(background),
        Err(e) => {
            warn!(
                path = %config.background_path.display(),
                error = %e,
                "Background image not available"
            );
            None
        }
    };
    let warning = background.is_none().then(|| {
        format!(
            "Background image not found: {}",
            config.background_path.display()
        )
    });

    let mut state = AppState::new(
        HealthRegistry::new(),
        metrics,
        logger.clone(),
        TypePredictor::new(artifacts),
        PageRenderer::new()?,
        &config.title,
    )
    .with_background(background);
    if let Some(warning) = warning {
        state = state.with_warning(warning);
    }

    api::record_startup_health(&state).await;
    state.health_registry.set_ready(true).await;

    let api_handle = tokio::spawn(api::serve(config.port, Arc::new(state)));

    // Wait for shutdown signal
    tokio::select! {
        result = api_handle => {
            match result {
                Ok(Err(e)) => logger.log_shutdown(&format!("server error: {}", e)),
                Err(e) => logger.log_shutdown(&format!("server task failed: {}", e)),
                Ok(Ok(())) => logger.log_shutdown("server stopped"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            logger.log_shutdown("SIGINT received");
        }
    }
    info!("Shutting down");

    Ok(())
}
