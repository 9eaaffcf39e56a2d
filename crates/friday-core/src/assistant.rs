//! The assistant: one session, its store and the reply pipeline.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, instrument, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{FridayConfig, ReplyDelayConfig};
use crate::deferred::{DeferredReplies, DeferredReply};
use crate::error::{FridayError, FridayResult};
use crate::handlers::smalltalk::{canned, Canned};
use crate::handlers::tasks::due_reminder;
use crate::handlers::{quiz, Context};
use crate::intent::{classify, dispatch, Intent};
use crate::session::Session;
use crate::store::create_store;
use crate::traits::{load_json, save_json, IntentDetector, KeyValueStore, StoreKey};
use crate::types::{Message, NewTask, Notebook, QuizQuestion, Task, TaskList, Theme};

/// Reply used when the intent relay fails.
pub const RELAY_APOLOGY: &str =
    "Sorry, I'm having trouble connecting to my brain right now. Please try again later.";

/// What a deferred fallback resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackOutcome {
    /// Final reply text.
    Reply(String),
    /// Render the latest quiz's answers from the session.
    QuizAnswers,
}

/// A resolved fallback, ready for [`Assistant::finish_fallback`].
#[derive(Debug, PartialEq, Eq)]
pub struct FallbackReply {
    generation: u64,
    pub outcome: FallbackOutcome,
}

/// A fallback reply still waiting out its delay.
pub struct PendingFallback {
    reply: DeferredReply<FallbackOutcome>,
}

impl PendingFallback {
    /// Wait for the outcome. `None` when a newer submission superseded it.
    pub async fn wait(self) -> Option<FallbackReply> {
        let generation = self.reply.generation();
        self.reply
            .wait()
            .await
            .map(|outcome| FallbackReply { generation, outcome })
    }
}

/// Result of submitting a message.
pub enum Submission {
    /// The handler replied immediately.
    Answered { intent: Intent, reply: String },
    /// Fallback input: the reply arrives after the artificial delay. Pass the
    /// resolved reply to [`Assistant::finish_fallback`].
    Deferred(PendingFallback),
}

/// A single-user assistant.
pub struct Assistant {
    session: Session,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    store: Arc<dyn KeyValueStore>,
    detector: Option<Arc<dyn IntentDetector>>,
    deferred: DeferredReplies,
    reminder_window: chrono::Duration,
}

impl Assistant {
    /// Create an assistant backed by `store`, restoring any saved state.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let session = restore_session(store.as_ref(), clock.now());
        Self {
            session,
            clock,
            rng: StdRng::from_entropy(),
            store,
            detector: None,
            deferred: DeferredReplies::default(),
            reminder_window: chrono::Duration::hours(1),
        }
    }

    /// Create an assistant from configuration.
    ///
    /// `detector` answers fallback input; without one the local canned table
    /// is used.
    pub fn from_config(
        config: &FridayConfig,
        detector: Option<Arc<dyn IntentDetector>>,
    ) -> FridayResult<Self> {
        let store = create_store(&config.store)?;
        let mut assistant = Self::new(store, Arc::new(SystemClock))
            .with_reply_delay(config.reply_delay)
            .with_reminder_window(config.reminders.window());
        assistant.detector = detector;
        Ok(assistant)
    }

    /// Answer fallback input through `detector`.
    pub fn with_detector(mut self, detector: Arc<dyn IntentDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Use a seeded RNG.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_reply_delay(mut self, delay: ReplyDelayConfig) -> Self {
        self.deferred = DeferredReplies::new(delay);
        self
    }

    pub fn with_reminder_window(mut self, window: chrono::Duration) -> Self {
        self.reminder_window = window;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    /// Classify without side effects.
    pub fn classify(&self, text: &str) -> Intent {
        classify(text)
    }

    /// Record a user message and start answering it.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn submit(&mut self, text: &str) -> FridayResult<Submission> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FridayError::validation_with_suggestion(
                "Message is empty",
                "Type something for FRIDAY to answer",
            ));
        }

        // Any reply still pending belongs to an older message.
        self.deferred.cancel_pending();

        let now = self.clock.now();
        self.session.push_user(text, now);
        let intent = classify(text);
        debug!(%intent, "Classified message");

        if intent.is_fallback() {
            let reply = self.fallback(text);
            debug!(
                delay_ms = reply.delay().as_millis() as u64,
                "Fallback reply scheduled"
            );
            self.persist();
            return Ok(Submission::Deferred(PendingFallback { reply }));
        }

        let reply = {
            let mut ctx = Context::new(&mut self.session, now, &mut self.rng);
            dispatch(&mut ctx, intent, text)
        };
        self.session.push_assistant(reply.clone(), now);
        self.persist();
        Ok(Submission::Answered { intent, reply })
    }

    fn fallback(&mut self, text: &str) -> DeferredReply<FallbackOutcome> {
        match &self.detector {
            Some(detector) => {
                let detector = Arc::clone(detector);
                let text = text.to_string();
                self.deferred.schedule(async move {
                    match detector.detect(&text).await {
                        Ok(detected) if detected.wants_quiz_answers() => {
                            FallbackOutcome::QuizAnswers
                        }
                        Ok(detected) => FallbackOutcome::Reply(detected.fulfillment_text),
                        Err(e) => {
                            error!(
                                provider = detector.provider_name(),
                                error = %e,
                                "Intent relay failed"
                            );
                            FallbackOutcome::Reply(RELAY_APOLOGY.to_string())
                        }
                    }
                })
            }
            None => {
                let outcome = match canned(text, self.clock.now(), &mut self.rng) {
                    Canned::Reply(reply) => FallbackOutcome::Reply(reply),
                    Canned::QuizAnswers => FallbackOutcome::QuizAnswers,
                };
                self.deferred.schedule(async move { outcome })
            }
        }
    }

    /// Record the reply of a deferred fallback and return its text.
    ///
    /// Returns `None` and records nothing when a newer submission, or a chat
    /// clear, came in after the fallback was scheduled.
    pub fn finish_fallback(&mut self, reply: FallbackReply) -> Option<String> {
        if !self.deferred.is_current(reply.generation) {
            debug!("Dropping superseded fallback reply");
            return None;
        }
        let now = self.clock.now();
        let reply = match reply.outcome {
            FallbackOutcome::Reply(reply) => reply,
            FallbackOutcome::QuizAnswers => self.quiz_answers(),
        };
        self.session.push_assistant(reply.clone(), now);
        self.persist();
        Some(reply)
    }

    /// Render the answers of the latest quiz without touching the chat log.
    pub fn quiz_answers(&mut self) -> String {
        let now = self.clock.now();
        let mut ctx = Context::new(&mut self.session, now, &mut self.rng);
        quiz::show_quiz_answers(&mut ctx)
    }

    /// Submit `text` and wait for the reply. `None` when a newer submission
    /// superseded it.
    pub async fn respond(&mut self, text: &str) -> FridayResult<Option<String>> {
        match self.submit(text)? {
            Submission::Answered { reply, .. } => Ok(Some(reply)),
            Submission::Deferred(pending) => match pending.wait().await {
                Some(ready) => Ok(self.finish_fallback(ready)),
                None => Ok(None),
            },
        }
    }

    /// Clear the chat log, keeping the welcome message.
    pub fn clear_chat(&mut self) {
        self.deferred.cancel_pending();
        self.session.clear_messages(self.clock.now());
        self.persist();
        info!("Chat history cleared");
    }

    pub fn theme(&self) -> Theme {
        self.session.theme()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.session.set_theme(theme);
        self.persist();
    }

    /// Flip between light and dark.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.session.theme().toggled();
        self.set_theme(theme);
        theme
    }

    /// Append a task without parsing its description. Returns the stored
    /// task with its assigned id.
    pub fn add_task(&mut self, new: NewTask) -> Task {
        let now = self.clock.now();
        let id = self.session.next_id(now);
        let mut task = Task::new(id, new.description, now).with_due_date(new.due_date);
        task.completed = new.completed;
        self.session.tasks_mut().push(task.clone());
        self.persist();
        task
    }

    /// Save a note under an explicit title. Returns `true` when an existing
    /// note was replaced.
    pub fn save_note(&mut self, title: &str, content: &str) -> bool {
        let now = self.clock.now();
        let replaced = self.session.notes_mut().save(title, content, now);
        if replaced {
            warn!(title, "Note title collision, previous note overwritten");
        }
        self.persist();
        replaced
    }

    /// Post a reminder for tasks due within the reminder window. Returns the
    /// reminder text when one was posted.
    pub fn check_due_tasks(&mut self) -> Option<String> {
        let now = self.clock.now();
        let reminder = due_reminder(self.session.tasks(), now, self.reminder_window)?;
        self.session.push_assistant(reminder.clone(), now);
        self.persist();
        info!("Task reminder posted");
        Some(reminder)
    }

    /// Write every changed collection back to the store. Failures are logged
    /// and the in-memory state is kept.
    fn persist(&mut self) {
        let dirty = self.session.take_dirty();
        if !dirty.any() {
            return;
        }
        let store = self.store.as_ref();
        let session = &self.session;
        if dirty.messages {
            report(store, StoreKey::Messages, save_json(store, StoreKey::Messages, session.messages()));
        }
        if dirty.tasks {
            report(store, StoreKey::Tasks, save_json(store, StoreKey::Tasks, session.tasks()));
        }
        if dirty.notes {
            report(store, StoreKey::Notes, save_json(store, StoreKey::Notes, session.notes()));
        }
        if dirty.quiz {
            let quiz = session.quiz();
            report(store, StoreKey::QuizAnswers, save_json(store, StoreKey::QuizAnswers, &quiz));
        }
        if dirty.theme {
            let theme = session.theme();
            report(store, StoreKey::Theme, save_json(store, StoreKey::Theme, &theme));
        }
    }
}

fn report(store: &dyn KeyValueStore, key: StoreKey, result: FridayResult<()>) {
    if let Err(e) = result {
        warn!(%key, backend = store.backend_name(), error = %e, "Failed to persist snapshot");
    }
}

fn load_or_warn<T: serde::de::DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StoreKey,
) -> Option<T> {
    match load_json(store, key) {
        Ok(value) => value,
        Err(e) => {
            warn!(%key, backend = store.backend_name(), error = %e, "Failed to load snapshot");
            None
        }
    }
}

fn restore_session(store: &dyn KeyValueStore, now: chrono::NaiveDateTime) -> Session {
    let messages: Option<Vec<Message>> = load_or_warn(store, StoreKey::Messages);
    let tasks: Option<TaskList> = load_or_warn(store, StoreKey::Tasks);
    let notes: Option<Notebook> = load_or_warn(store, StoreKey::Notes);
    let quiz: Option<Option<Vec<QuizQuestion>>> = load_or_warn(store, StoreKey::QuizAnswers);
    let theme: Option<Theme> = load_or_warn(store, StoreKey::Theme);

    let session = Session::restore(now, messages, tasks, notes, quiz.flatten(), theme);
    debug!(
        messages = session.messages().len(),
        tasks = session.tasks().len(),
        notes = session.notes().len(),
        "Session restored"
    );
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;
    use crate::traits::{DetectedIntent, MockIntentDetector};
    use chrono::NaiveDate;

    fn assistant() -> (Assistant, Arc<MemoryStore>) {
        let now = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let store = Arc::new(MemoryStore::new());
        let assistant = Assistant::new(store.clone(), Arc::new(FixedClock::new(now)))
            .with_rng(StdRng::seed_from_u64(3))
            .with_reply_delay(ReplyDelayConfig::none());
        (assistant, store)
    }

    #[tokio::test]
    async fn test_handler_reply_is_logged_and_persisted() {
        let (mut assistant, store) = assistant();
        let reply = assistant.respond("remind me to stretch").await.unwrap().unwrap();
        assert!(reply.contains("Task Added"));

        assert_eq!(assistant.messages().len(), 3);
        assert!(store.load("tasks").unwrap().unwrap().contains("stretch"));
        assert!(store.load("messages").unwrap().is_some());
        assert!(store.load("notes").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let (mut assistant, _) = assistant();
        assert!(assistant.submit("   ").is_err());
        assert_eq!(assistant.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_uses_detector() {
        let (assistant, _) = assistant();
        let mut detector = MockIntentDetector::new();
        detector
            .expect_detect()
            .returning(|_| Ok(DetectedIntent::reply("Howdy!")));
        detector.expect_provider_name().return_const("mock".to_string());
        let mut assistant = assistant.with_detector(Arc::new(detector));

        assert_eq!(assistant.respond("hey there").await.unwrap().as_deref(), Some("Howdy!"));
    }

    #[tokio::test]
    async fn test_relay_failure_becomes_apology() {
        let (assistant, _) = assistant();
        let mut detector = MockIntentDetector::new();
        detector
            .expect_detect()
            .returning(|_| Err(FridayError::relay("boom")));
        detector.expect_provider_name().return_const("mock".to_string());
        let mut assistant = assistant.with_detector(Arc::new(detector));

        let reply = assistant.respond("hey there").await.unwrap().unwrap();
        assert_eq!(reply, RELAY_APOLOGY);
        assert_eq!(assistant.messages().last().unwrap().text, RELAY_APOLOGY);
    }

    #[tokio::test]
    async fn test_detector_quiz_answers_read_session() {
        let (mut assistant, _) = assistant();
        assistant.respond("quiz on math").await.unwrap();

        let mut detector = MockIntentDetector::new();
        detector.expect_detect().returning(|_| {
            Ok(DetectedIntent::default().with_intent(crate::traits::QUIZ_ANSWERS_INTENT))
        });
        detector.expect_provider_name().return_const("mock".to_string());
        let mut assistant = assistant.with_detector(Arc::new(detector));

        let reply = assistant.respond("show quiz answers").await.unwrap().unwrap();
        assert!(reply.contains("Answer: 3.14"));
    }

    #[tokio::test]
    async fn test_newer_submission_supersedes_fallback() {
        let (assistant, _) = assistant();
        let mut assistant = assistant.with_reply_delay(ReplyDelayConfig::fixed(50));

        let first = match assistant.submit("hello").unwrap() {
            Submission::Deferred(pending) => pending,
            Submission::Answered { .. } => panic!("expected deferred reply"),
        };
        let second = match assistant.submit("tell me a joke").unwrap() {
            Submission::Deferred(pending) => pending,
            Submission::Answered { .. } => panic!("expected deferred reply"),
        };

        assert_eq!(first.wait().await, None);
        let ready = second.wait().await.unwrap();
        let reply = assistant.finish_fallback(ready).unwrap();
        assert!(reply.starts_with("## 😂 Here's a Joke"));
    }

    #[tokio::test]
    async fn test_handled_submission_supersedes_pending_fallback() {
        let (assistant, _) = assistant();
        let mut assistant = assistant.with_reply_delay(ReplyDelayConfig::fixed(50));

        let greeting = match assistant.submit("hello").unwrap() {
            Submission::Deferred(pending) => pending,
            Submission::Answered { .. } => panic!("expected deferred reply"),
        };
        assert!(matches!(
            assistant.submit("show my tasks").unwrap(),
            Submission::Answered { intent: Intent::ListTasks, .. }
        ));

        assert_eq!(greeting.wait().await, None);
        let texts: Vec<&str> = assistant.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts[1..3], ["hello", "show my tasks"]);
        assert!(texts[3].starts_with("## 📋"));
        assert_eq!(texts.len(), 4);
    }

    #[tokio::test]
    async fn test_resolved_fallback_dropped_after_newer_submission() {
        let (mut assistant, _) = assistant();

        let greeting = match assistant.submit("hello").unwrap() {
            Submission::Deferred(pending) => pending,
            Submission::Answered { .. } => panic!("expected deferred reply"),
        };
        let ready = greeting.wait().await.unwrap();

        assistant.submit("show my tasks").unwrap();
        assert_eq!(assistant.finish_fallback(ready), None);
        assert!(assistant.messages().last().unwrap().text.starts_with("## 📋"));
        assert_eq!(assistant.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_due_reminder_posted() {
        let (mut assistant, _) = assistant();
        assert!(assistant.check_due_tasks().is_none());

        assistant.respond("remind me to leave at 10am").await.unwrap();
        let reminder = assistant.check_due_tasks().unwrap();
        assert!(reminder.contains("1. leave (Due: Today at 10:00 AM)"));
        assert_eq!(assistant.messages().last().unwrap().text, reminder);
    }

    #[tokio::test]
    async fn test_raw_task_gets_session_id() {
        let (mut assistant, store) = assistant();
        assistant.respond("remind me to stretch").await.unwrap();
        let last_id: i64 = assistant.messages().last().unwrap().id.parse().unwrap();

        let task = assistant.add_task(NewTask {
            description: "pay rent".to_string(),
            ..Default::default()
        });
        let id: i64 = task.id.parse().unwrap();
        assert!(id > last_id);
        assert_eq!(task.created_at, assistant.clock.now());
        assert!(!task.completed);
        assert_eq!(assistant.session().tasks().len(), 2);
        assert!(store.load("tasks").unwrap().unwrap().contains("pay rent"));
    }

    #[tokio::test]
    async fn test_clear_and_theme() {
        let (mut assistant, store) = assistant();
        assistant.respond("hello").await.unwrap();
        assistant.clear_chat();
        assert_eq!(assistant.messages().len(), 1);

        assert_eq!(assistant.toggle_theme(), Theme::Dark);
        assert_eq!(store.load("theme").unwrap().as_deref(), Some("\"dark\""));
    }
}
