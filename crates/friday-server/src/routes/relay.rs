//! Intent relay endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned with status 500 whenever the relay fails.
pub const RELAY_FAILURE: &str = "Failed to process your request";

/// Request body for the relay.
#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    pub message: String,
}

/// Fulfillment text from the detector. A quiz-answers intent is answered
/// from the current session instead.
#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
struct RelayFailure {
    error: &'static str,
}

/// Forward a message to the intent detector.
/// POST /send-message, POST /api/dialogflow
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<RelayRequest>,
) -> Response {
    if request.message.trim().is_empty() {
        return ApiError::validation("message must not be empty").into_response();
    }

    match state.detector.detect(&request.message).await {
        Ok(detected) => {
            let reply = if detected.wants_quiz_answers() {
                state.with_assistant_mut(|a| a.quiz_answers()).await
            } else {
                detected.fulfillment_text
            };
            Json(RelayResponse { reply }).into_response()
        }
        Err(e) => {
            error!(
                provider = state.detector.provider_name(),
                error = %e,
                "Error processing relay request"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayFailure {
                    error: RELAY_FAILURE,
                }),
            )
                .into_response()
        }
    }
}
