//! LQA API Server
//!
//! Serves the legal query relay endpoint.
//!
//! Author: hephaex@gmail.com

use lqa_api::{create_router, state::AppState};
use lqa_core::{AppConfig, LoggingConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading configuration
    dotenvy::dotenv().ok();

    let config = match std::env::var("LQA_CONFIG") {
        Ok(path) => AppConfig::from_file(path)?.with_env_override()?,
        Err(_) => AppConfig::from_env()?,
    };

    init_tracing(&config.logging);

    let addr = config.server.bind_addr();
    let state = Arc::new(AppState::from_config(config)?);
    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(backend = state.backend_name(), "LQA API Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    tracing::info!("LQA API Server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let level = &logging.level;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("lqa_api={level},lqa_relay={level},tower_http={level}").into()
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal(state: Arc<AppState>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Keep serving; only an actual signal ends the server
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining requests");
    state.set_ready(false);
}
