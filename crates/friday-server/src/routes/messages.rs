//! Chat log endpoints.

use axum::{extract::State, Json};

use friday_core::types::Message;

use crate::error::ApiResult;
use crate::state::AppState;

/// Get the chat log, oldest first.
/// GET /messages
pub async fn get_messages(State(state): State<AppState>) -> ApiResult<Json<Vec<Message>>> {
    let messages = state.with_assistant(|a| a.messages().to_vec()).await;
    Ok(Json(messages))
}

/// Clear the chat log. The welcome message stays.
/// DELETE /messages
pub async fn clear_messages(State(state): State<AppState>) -> ApiResult<Json<Vec<Message>>> {
    let messages = state
        .with_assistant_mut(|a| {
            a.clear_chat();
            a.messages().to_vec()
        })
        .await;
    Ok(Json(messages))
}
