//! API route definitions
//!
//! Author: hephaex@gmail.com

use crate::handlers::submit;
use crate::state::AppState;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Routes mounted under `/api`
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/submit", post(submit::submit_handler))
}
