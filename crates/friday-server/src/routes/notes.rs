//! Note endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use friday_core::types::Notebook;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for saving a note under an explicit title.
#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SavedNote {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AddNoteResponse {
    pub success: bool,
    pub note: SavedNote,
    /// Whether a note with the same title was overwritten.
    pub replaced: bool,
}

/// Get all notes.
/// GET /notes
pub async fn get_notes(State(state): State<AppState>) -> ApiResult<Json<Notebook>> {
    let notes = state.with_assistant(|a| a.session().notes().clone()).await;
    Ok(Json(notes))
}

/// Save a note.
/// POST /api/notes
pub async fn add_note(
    State(state): State<AppState>,
    Json(request): Json<AddNoteRequest>,
) -> ApiResult<Json<AddNoteResponse>> {
    let title = request.title.trim().to_string();
    if title.is_empty() {
        return Err(ApiError::validation("title must not be empty"));
    }

    let replaced = state
        .with_assistant_mut(|a| a.save_note(&title, &request.content))
        .await;

    Ok(Json(AddNoteResponse {
        success: true,
        note: SavedNote {
            title,
            content: request.content,
        },
        replaced,
    }))
}
