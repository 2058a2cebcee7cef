//! LQA API - HTTP server for legal query submissions
//!
//! Exposes `POST /api/submit` backed by either the live relay or the mock,
//! plus health, readiness, metrics and OpenAPI endpoints.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use handlers::health;
use state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultOnFailure, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Legal Query Assistant API",
        description = "Relays legal queries to an upstream language model"
    ),
    paths(
        handlers::submit::submit_handler,
        handlers::health::health_check,
        handlers::health::readiness_check,
    ),
    components(schemas(
        lqa_core::SubmitRequest,
        lqa_core::SubmitResponse,
        error::ApiError,
        health::HealthResponse,
        health::ReadinessResponse,
    )),
    tags(
        (name = "submit", description = "Legal query submission"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let cors = middleware::cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics))
        .nest("/api", routes::api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        // submit_handler logs upstream failures itself
        .layer(
            TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::DEBUG)),
        )
        .with_state(state)
}

/// Router over an instant mock backend, for tests
#[cfg(any(test, feature = "test-utils"))]
pub fn create_router_for_testing() -> Router {
    let backend = Arc::new(lqa_relay::MockBackend::new(Duration::ZERO));
    let state = AppState::new(lqa_core::AppConfig::default(), backend);
    create_router(Arc::new(state))
}
