//! Explicit session context shared by every handler.
//!
//! Holds the four process-local collections plus the theme preference.
//! Mutating accessors record which collections changed so the owner can
//! write exactly those snapshots back to the store.

use chrono::NaiveDateTime;

use crate::types::{Message, Notebook, QuizQuestion, TaskList, Theme};

/// Collections touched since the last [`Session::take_dirty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub messages: bool,
    pub tasks: bool,
    pub notes: bool,
    pub quiz: bool,
    pub theme: bool,
}

impl Dirty {
    pub fn any(&self) -> bool {
        self.messages || self.tasks || self.notes || self.quiz || self.theme
    }
}

/// In-memory state for one user conversation.
#[derive(Debug, Clone)]
pub struct Session {
    messages: Vec<Message>,
    tasks: TaskList,
    notes: Notebook,
    quiz: Option<Vec<QuizQuestion>>,
    theme: Theme,
    last_id: i64,
    dirty: Dirty,
}

impl Session {
    /// Create an empty session seeded with the welcome message.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            messages: vec![Message::welcome(now)],
            tasks: TaskList::new(),
            notes: Notebook::new(),
            quiz: None,
            theme: Theme::default(),
            last_id: 0,
            dirty: Dirty::default(),
        }
    }

    /// Rebuild a session from persisted collections.
    ///
    /// A log without the welcome message gets one prepended.
    pub fn restore(
        now: NaiveDateTime,
        messages: Option<Vec<Message>>,
        tasks: Option<TaskList>,
        notes: Option<Notebook>,
        quiz: Option<Vec<QuizQuestion>>,
        theme: Option<Theme>,
    ) -> Self {
        let mut session = Self::new(now);
        if let Some(mut messages) = messages {
            if !messages.iter().any(Message::is_welcome) {
                messages.insert(0, Message::welcome(now));
            }
            session.messages = messages;
        }
        session.tasks = tasks.unwrap_or_default();
        session.notes = notes.unwrap_or_default();
        session.quiz = quiz;
        session.theme = theme.unwrap_or_default();
        session.last_id = session
            .tasks
            .iter()
            .map(|t| t.id.as_str())
            .chain(session.messages.iter().map(|m| m.id.as_str()))
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        session
    }

    /// Next opaque id: creation time in milliseconds, strictly increasing.
    pub fn next_id(&mut self, now: NaiveDateTime) -> String {
        let millis = now.and_utc().timestamp_millis();
        self.last_id = millis.max(self.last_id + 1);
        self.last_id.to_string()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a user message and return its id.
    pub fn push_user(&mut self, text: impl Into<String>, now: NaiveDateTime) -> String {
        let id = self.next_id(now);
        self.messages.push(Message::user(id.clone(), text, now));
        self.dirty.messages = true;
        id
    }

    /// Append an assistant message and return its id.
    pub fn push_assistant(&mut self, text: impl Into<String>, now: NaiveDateTime) -> String {
        let id = self.next_id(now);
        self.messages.push(Message::assistant(id.clone(), text, now));
        self.dirty.messages = true;
        id
    }

    /// Drop every message except the welcome message.
    pub fn clear_messages(&mut self, now: NaiveDateTime) {
        let welcome = self
            .messages
            .iter()
            .find(|m| m.is_welcome())
            .cloned()
            .unwrap_or_else(|| Message::welcome(now));
        self.messages = vec![welcome];
        self.dirty.messages = true;
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskList {
        self.dirty.tasks = true;
        &mut self.tasks
    }

    pub fn notes(&self) -> &Notebook {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut Notebook {
        self.dirty.notes = true;
        &mut self.notes
    }

    /// Questions of the most recent quiz, if any was generated.
    pub fn quiz(&self) -> Option<&[QuizQuestion]> {
        self.quiz.as_deref()
    }

    /// Replace the stored quiz.
    pub fn set_quiz(&mut self, questions: Vec<QuizQuestion>) {
        self.quiz = Some(questions);
        self.dirty.quiz = true;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.dirty.theme = true;
    }

    /// Return and reset the set of changed collections.
    pub fn take_dirty(&mut self) -> Dirty {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut session = Session::new(now());
        let a: i64 = session.next_id(now()).parse().unwrap();
        let b: i64 = session.next_id(now()).parse().unwrap();
        assert_eq!(b, a + 1);
    }

    #[test]
    fn test_clear_keeps_welcome() {
        let mut session = Session::new(now());
        session.push_user("hi", now());
        session.push_assistant("hello", now());
        assert_eq!(session.messages().len(), 3);

        session.clear_messages(now());
        assert_eq!(session.messages().len(), 1);
        assert!(session.messages()[0].is_welcome());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut session = Session::new(now());
        assert!(!session.take_dirty().any());

        session.notes_mut().save("t", "c", now());
        let dirty = session.take_dirty();
        assert!(dirty.notes);
        assert!(!dirty.tasks);
        assert!(!session.take_dirty().any());
    }

    #[test]
    fn test_restore_prepends_welcome_and_resumes_ids() {
        let log = vec![Message::user("1709294400500", "old", now())];
        let mut session = Session::restore(now(), Some(log), None, None, None, None);
        assert!(session.messages()[0].is_welcome());
        let next: i64 = session.next_id(now()).parse().unwrap();
        assert_eq!(next, 1709294400501);
    }
}
