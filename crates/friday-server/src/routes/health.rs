//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub relay: String,
    pub messages: usize,
    pub version: String,
}

/// Health check endpoint.
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let messages = state.with_assistant(|a| a.messages().len()).await;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        relay: state.detector.provider_name().to_string(),
        messages,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
