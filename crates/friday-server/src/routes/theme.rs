//! Theme endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use friday_core::types::Theme;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

/// GET /theme
pub async fn get_theme(State(state): State<AppState>) -> ApiResult<Json<ThemeBody>> {
    let theme = state.with_assistant(|a| a.theme()).await;
    Ok(Json(ThemeBody { theme }))
}

/// PUT /theme
pub async fn set_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> ApiResult<Json<ThemeBody>> {
    state.with_assistant_mut(|a| a.set_theme(body.theme)).await;
    Ok(Json(body))
}

/// POST /theme/toggle
pub async fn toggle_theme(State(state): State<AppState>) -> ApiResult<Json<ThemeBody>> {
    let theme = state.with_assistant_mut(|a| a.toggle_theme()).await;
    Ok(Json(ThemeBody { theme }))
}
