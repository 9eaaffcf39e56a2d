//! Offline intent detector backed by the canned small-talk table.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use friday_core::clock::{Clock, SystemClock};
use friday_core::error::FridayResult;
use friday_core::handlers::quiz::NO_QUIZ;
use friday_core::handlers::smalltalk::{canned, Canned};
use friday_core::traits::{DetectedIntent, IntentDetector, QUIZ_ANSWERS_INTENT};

/// Intent name reported for every canned reply.
pub const SMALLTALK_INTENT: &str = "friday.smalltalk";

/// Local detector. Never touches the network.
pub struct LocalDetector {
    clock: Arc<dyn Clock>,
}

impl LocalDetector {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Use `clock` for time and date replies.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn answer(&self, text: &str) -> DetectedIntent {
        match canned(text, self.clock.now(), &mut rand::thread_rng()) {
            Canned::Reply(reply) => DetectedIntent::reply(reply).with_intent(SMALLTALK_INTENT),
            // Callers holding a session render the answers themselves.
            Canned::QuizAnswers => DetectedIntent::reply(NO_QUIZ).with_intent(QUIZ_ANSWERS_INTENT),
        }
    }
}

impl Default for LocalDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentDetector for LocalDetector {
    async fn detect(&self, text: &str) -> FridayResult<DetectedIntent> {
        let detected = self.answer(text);
        debug!(intent = ?detected.intent_name, "Local detection");
        Ok(detected)
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use friday_core::clock::FixedClock;
    use friday_core::handlers::smalltalk::{HELP, JOKES};

    fn detector() -> LocalDetector {
        let now = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        LocalDetector::with_clock(Arc::new(FixedClock::new(now)))
    }

    #[tokio::test]
    async fn test_help() {
        let detected = detector().detect("what can you do").await.unwrap();
        assert_eq!(detected.fulfillment_text, HELP);
        assert_eq!(detected.intent_name.as_deref(), Some(SMALLTALK_INTENT));
    }

    #[tokio::test]
    async fn test_time_uses_clock() {
        let detected = detector().detect("what time is it").await.unwrap();
        assert!(detected.fulfillment_text.contains("2:05:00 PM"));
    }

    #[tokio::test]
    async fn test_joke_comes_from_table() {
        let detected = detector().detect("tell me a joke").await.unwrap();
        assert!(JOKES.iter().any(|j| detected.fulfillment_text.ends_with(j)));
    }

    #[tokio::test]
    async fn test_quiz_answers_flagged() {
        let detected = detector().detect("show quiz answers").await.unwrap();
        assert!(detected.wants_quiz_answers());
        assert_eq!(detected.fulfillment_text, NO_QUIZ);
    }
}
