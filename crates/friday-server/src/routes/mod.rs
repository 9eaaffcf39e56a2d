//! Route definitions for the REST API.

mod chat;
mod health;
mod messages;
mod notes;
mod quiz;
mod relay;
mod tasks;
mod theme;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Intent relay
        .route("/send-message", post(relay::send_message))
        .route("/api/dialogflow", post(relay::send_message))
        // Chat pipeline
        .route("/chat", post(chat::chat))
        .route(
            "/messages",
            get(messages::get_messages).delete(messages::clear_messages),
        )
        // Tasks
        .route("/tasks", get(tasks::get_tasks))
        .route("/api/tasks", get(tasks::get_tasks).post(tasks::add_task))
        // Notes
        .route("/notes", get(notes::get_notes))
        .route("/api/notes", get(notes::get_notes).post(notes::add_note))
        // Quiz
        .route("/quiz/answers", get(quiz::get_quiz_answers))
        // Theme
        .route("/theme", get(theme::get_theme).put(theme::set_theme))
        .route("/theme/toggle", post(theme::toggle_theme))
        // Attach state
        .with_state(state)
}

pub use chat::*;
pub use health::*;
pub use messages::*;
pub use notes::*;
pub use quiz::*;
pub use relay::*;
pub use tasks::*;
pub use theme::*;
