//! API error handling
//!
//! Author: hephaex@gmail.com

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lqa_core::LqaError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message returned for every upstream failure; the cause stays in the logs
pub const UPSTREAM_FAILURE_MESSAGE: &str = "API request failed";

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable message
    #[schema(example = "API request failed")]
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn upstream_failure() -> Self {
        Self::new(UPSTREAM_FAILURE_MESSAGE)
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// Upstream failure; the payload is the operator-facing cause
    Upstream(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new(msg)),
            AppError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::upstream_failure(),
            ),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal_error()),
        };

        (status, Json(error)).into_response()
    }
}

impl From<LqaError> for AppError {
    fn from(err: LqaError) -> Self {
        match err {
            LqaError::Validation(msg) => AppError::BadRequest(msg),
            LqaError::Upstream(_) | LqaError::UpstreamStatus { .. } => {
                AppError::Upstream(err.to_string())
            }
            LqaError::Config(msg) => AppError::Internal(format!("Configuration error: {msg}")),
            LqaError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}
