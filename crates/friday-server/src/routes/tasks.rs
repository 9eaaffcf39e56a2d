//! Task endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use friday_core::types::{NewTask, Task, TaskList};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AddTaskResponse {
    pub success: bool,
    pub task: Task,
}

/// Get all tasks in insertion order.
/// GET /tasks
pub async fn get_tasks(State(state): State<AppState>) -> ApiResult<Json<TaskList>> {
    let tasks = state.with_assistant(|a| a.session().tasks().clone()).await;
    Ok(Json(tasks))
}

/// Append a task without parsing its description. The assistant assigns
/// the id and creation time.
/// POST /api/tasks
pub async fn add_task(
    State(state): State<AppState>,
    Json(request): Json<NewTask>,
) -> ApiResult<Json<AddTaskResponse>> {
    if request.description.trim().is_empty() {
        return Err(ApiError::validation("description must not be empty"));
    }

    let task = state.with_assistant_mut(|a| a.add_task(request)).await;

    Ok(Json(AddTaskResponse {
        success: true,
        task,
    }))
}
