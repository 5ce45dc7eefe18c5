//! # regscope-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to a configurable port (default
//! 8080); an alternative rule table can be supplied via `RULES_PATH`.

use regscope_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;

    // Load and validate the rule table before binding; a bad table must
    // stop the service, not surface per-request.
    let state = AppState::from_config(config).map_err(|e| {
        tracing::error!("rule table bootstrap failed: {e}");
        e
    })?;

    tracing::info!(
        rules = state.engine.table().len(),
        "rule table loaded and validated"
    );

    let app = regscope_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Regscope API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
