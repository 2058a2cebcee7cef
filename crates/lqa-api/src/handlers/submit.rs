//! Legal query submission handler
//!
//! Author: hephaex@gmail.com

use crate::error::{ApiError, AppError};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use lqa_core::{LqaError, SubmitRequest, SubmitResponse};
use std::sync::Arc;

/// Relay a legal query to the configured backend
#[utoipa::path(
    post,
    path = "/api/submit",
    tag = "submit",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Query answered", body = SubmitResponse),
        (status = 400, description = "Missing or blank field", body = ApiError),
        (status = 500, description = "Upstream request failed", body = ApiError)
    )
)]
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    state.increment_requests();

    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    tracing::debug!(
        backend = state.backend_name(),
        file_name = %request.file_name,
        "Handling submission"
    );

    match state.backend.submit(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(LqaError::Validation(msg)) => Err(AppError::BadRequest(msg)),
        Err(err) => {
            tracing::error!(
                backend = state.backend_name(),
                error = %err,
                "API request failed"
            );
            Err(err.into())
        }
    }
}
