//! Notes keyed by derived title.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A saved note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Flat title -> note mapping that keeps first-insertion order.
///
/// Saving under an existing title replaces that note in place. There is no
/// versioning: the previous content is gone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notebook {
    notes: Vec<Note>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a note, returning `true` when an existing note was overwritten.
    pub fn save(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> bool {
        let note = Note {
            title: title.into(),
            content: content.into(),
            created_at,
        };
        match self.notes.iter_mut().find(|n| n.title == note.title) {
            Some(existing) => {
                *existing = note;
                true
            }
            None => {
                self.notes.push(note);
                false
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.title == title)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    /// The note with the latest creation time. Ties go to the earlier entry.
    pub fn latest(&self) -> Option<&Note> {
        self.notes.iter().fold(None, |latest: Option<&Note>, note| match latest {
            Some(l) if note.created_at <= l.created_at => Some(l),
            _ => Some(note),
        })
    }

    /// Find the note a free-text query refers to.
    ///
    /// Whole-title containment wins; otherwise any title word longer than
    /// three characters found in the query.
    pub fn find_mentioned(&self, query: &str) -> Option<&Note> {
        let query = query.to_lowercase();
        self.notes
            .iter()
            .find(|n| query.contains(&n.title.to_lowercase()))
            .or_else(|| {
                self.notes.iter().find(|n| {
                    n.title
                        .to_lowercase()
                        .split(' ')
                        .any(|word| word.chars().count() > 3 && query.contains(word))
                })
            })
    }
}
