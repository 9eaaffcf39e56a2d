//! Quiz endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use friday_core::types::QuizQuestion;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuizAnswersResponse {
    pub questions: Vec<QuizQuestion>,
}

/// Get the questions and answers of the latest quiz.
/// GET /quiz/answers
pub async fn get_quiz_answers(
    State(state): State<AppState>,
) -> ApiResult<Json<QuizAnswersResponse>> {
    let questions = state
        .with_assistant(|a| a.session().quiz().map(<[QuizQuestion]>::to_vec))
        .await
        .ok_or_else(|| ApiError::not_found("No quiz has been generated yet"))?;

    Ok(Json(QuizAnswersResponse { questions }))
}
