//! Chat endpoint: the full assistant pipeline.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use friday_core::assistant::Submission;
use friday_core::intent::Intent;

use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for a chat turn.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response for a chat turn.
///
/// `reply` is `null` and `superseded` is set when a newer message cancelled
/// this one before its reply was ready.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub superseded: bool,
}

/// Send a message to the assistant.
/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let submission = state
        .with_assistant_mut(|a| a.submit(&request.message))
        .await?;

    let response = match submission {
        Submission::Answered { intent, reply } => ChatResponse {
            reply: Some(reply),
            intent: Some(intent),
            superseded: false,
        },
        // The lock is released while the deferred reply is pending.
        Submission::Deferred(pending) => {
            let reply = match pending.wait().await {
                Some(ready) => state.with_assistant_mut(|a| a.finish_fallback(ready)).await,
                None => None,
            };
            match reply {
                Some(reply) => ChatResponse {
                    reply: Some(reply),
                    intent: Some(Intent::Fallback),
                    superseded: false,
                },
                None => {
                    debug!("Reply superseded by a newer message");
                    ChatResponse {
                        reply: None,
                        intent: None,
                        superseded: true,
                    }
                }
            }
        }
    };

    Ok(Json(response))
}
