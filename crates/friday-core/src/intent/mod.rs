//! Intent classification.
//!
//! Rules are tried in a fixed order against the lower-cased input and the
//! first match wins. Overlapping phrases ("summarize my note") resolve to
//! whichever rule comes first.

mod router;

pub use router::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    CreateTask,
    ListTasks,
    CompleteTask,
    SaveNote,
    RetrieveNote,
    Summarize,
    Quiz,
    ProductivityTip,
    Fallback,
}

impl Intent {
    /// Whether the reply comes from the canned table or the relay.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Intent::Fallback)
    }
}

/// Classify raw user text.
pub fn classify(text: &str) -> Intent {
    let input = text.to_lowercase();
    let has = |needle: &str| input.contains(needle);

    if has("remind me to") || has("add task") || (has("create") && has("task")) {
        return Intent::CreateTask;
    }

    if ((has("show") || has("list")) && has("task")) || has("my tasks") {
        return Intent::ListTasks;
    }

    if (has("complete") || has("mark") || has("finish")) && has("task") {
        return Intent::CompleteTask;
    }

    if (has("save") || has("store") || has("take")) && has("note") {
        return Intent::SaveNote;
    }

    if (has("show") || has("get") || has("retrieve")) && has("note") {
        return Intent::RetrieveNote;
    }

    if has("summarize") || (has("summary") && has("of")) {
        return Intent::Summarize;
    }

    // Requests for quiz answers belong to the canned table.
    if (has("quiz") && !has("quiz answers"))
        || has("test me")
        || (has("generate") && has("questions"))
    {
        return Intent::Quiz;
    }

    if (has("productivity") && (has("tip") || has("advice"))) || has("be more productive") {
        return Intent::ProductivityTip;
    }

    Intent::Fallback
}
