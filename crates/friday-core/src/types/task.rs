//! Task types and the ordered task list.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A to-do item created from free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque id derived from the creation time.
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
}

impl Task {
    /// Create a new pending task.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            completed: false,
            created_at,
            due_date: None,
        }
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due_date: Option<NaiveDateTime>) -> Self {
        self.due_date = due_date;
        self
    }
}

/// Task fields supplied from outside the chat. The assistant assigns the id
/// and creation time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewTask {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
}

/// Tasks in insertion order. Tasks are never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn last(&self) -> Option<&Task> {
        self.tasks.last()
    }

    /// Pending tasks in insertion order.
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Completed tasks in insertion order.
    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    /// Mark the `index`-th pending task (0-based) as complete.
    pub fn complete_pending_at(&mut self, index: usize) -> Option<&Task> {
        let task = self.tasks.iter_mut().filter(|t| !t.completed).nth(index)?;
        task.completed = true;
        Some(task)
    }

    /// Mark the first pending task whose description appears in `input`
    /// (case-insensitive) as complete.
    pub fn complete_mentioned(&mut self, input: &str) -> Option<&Task> {
        let input = input.to_lowercase();
        let task = self.tasks.iter_mut().find(|t| {
            !t.completed
                && !t.description.is_empty()
                && input.contains(&t.description.to_lowercase())
        })?;
        task.completed = true;
        Some(task)
    }

    /// Pending tasks whose due date falls before `now + window`.
    pub fn due_within(&self, now: NaiveDateTime, window: Duration) -> Vec<&Task> {
        let horizon = now + window;
        self.pending()
            .filter(|t| t.due_date.map(|due| due <= horizon).unwrap_or(false))
            .collect()
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn sample() -> TaskList {
        let mut list = TaskList::new();
        list.push(Task::new("1", "call mom", at(8, 0)));
        list.push(Task::new("2", "buy milk", at(8, 1)));
        list.push(Task::new("3", "water plants", at(8, 2)));
        list
    }

    #[test]
    fn test_complete_pending_index_skips_completed() {
        let mut list = sample();
        list.complete_pending_at(0).unwrap();
        // "buy milk" is now the first pending task.
        let task = list.complete_pending_at(0).unwrap();
        assert_eq!(task.description, "buy milk");
        assert_eq!(list.pending().count(), 1);
        assert!(list.complete_pending_at(5).is_none());
    }

    #[test]
    fn test_complete_mentioned_is_case_insensitive() {
        let mut list = sample();
        let task = list.complete_mentioned("Mark task Water Plants as done").unwrap();
        assert_eq!(task.id, "3");
        assert!(list.complete_mentioned("mark task water plants").is_none());
    }

    #[test]
    fn test_empty_description_never_matches() {
        let mut list = TaskList::new();
        list.push(Task::new("1", "", at(8, 0)));
        assert!(list.complete_mentioned("complete task anything").is_none());
    }

    #[test]
    fn test_due_within_window() {
        let mut list = sample();
        list.push(Task::new("4", "soon", at(8, 3)).with_due_date(Some(at(9, 30))));
        list.push(Task::new("5", "later", at(8, 4)).with_due_date(Some(at(12, 0))));
        let due = list.due_within(at(9, 0), Duration::hours(1));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].description, "soon");
    }
}
