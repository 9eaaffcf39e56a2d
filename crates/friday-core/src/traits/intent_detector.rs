//! Intent detector trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FridayResult;

/// Intent name under which a detector reports a request for the latest
/// quiz's answers. Those answers live in the session, not in the detector.
pub const QUIZ_ANSWERS_INTENT: &str = "friday.quiz_answers";

/// Result of detecting the intent behind an utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedIntent {
    /// Reply text, passed through verbatim.
    pub fulfillment_text: String,
    /// Display name of the matched intent, if the service reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_name: Option<String>,
    /// Detection confidence in `0.0..=1.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl DetectedIntent {
    /// A detection carrying only reply text.
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
            ..Default::default()
        }
    }

    /// Set the intent name.
    pub fn with_intent(mut self, name: impl Into<String>) -> Self {
        self.intent_name = Some(name.into());
        self
    }

    /// Whether the detector asked for the session's quiz answers.
    pub fn wants_quiz_answers(&self) -> bool {
        self.intent_name.as_deref() == Some(QUIZ_ANSWERS_INTENT)
    }
}

/// External intent-detection service: all relay providers implement this.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntentDetector: Send + Sync {
    /// Detect the intent of `text` and produce a reply.
    async fn detect(&self, text: &str) -> FridayResult<DetectedIntent>;

    /// Provider name for logs.
    fn provider_name(&self) -> &str;
}
