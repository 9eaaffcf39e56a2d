//! Chat log message types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier of the synthetic greeting that survives a chat clear.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

/// Greeting shown at the top of every conversation.
pub const WELCOME_TEXT: &str = "# 👋 Hello!\n\nI'm FRIDAY LITE, your personal assistant. I can help with:\n\n- **Task management** (reminders, to-dos)\n- **Note taking** and summarization\n- **Study assistance** (generate quizzes, summarize content)\n- **Productivity tips**\n\nHow can I assist you today?";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A message in the chat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: NaiveDateTime,
}

impl Message {
    /// Create a new user message.
    pub fn user(id: impl Into<String>, text: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sender: Sender::User,
            timestamp,
        }
    }

    /// Create a new assistant message.
    pub fn assistant(
        id: impl Into<String>,
        text: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sender: Sender::Assistant,
            timestamp,
        }
    }

    /// Create the welcome message.
    pub fn welcome(timestamp: NaiveDateTime) -> Self {
        Self::assistant(WELCOME_MESSAGE_ID, WELCOME_TEXT, timestamp)
    }

    /// Whether this is the synthetic welcome message.
    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_MESSAGE_ID
    }
}
