//! Note saving, retrieval and listing.
//!
//! Titles are derived from the text, so two different notes can collide on
//! the same title. The later save replaces the earlier note without warning.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::format::format_date;
use super::Context;

static EXPLICIT_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)titled\s+["']([^"']+)["']"#).unwrap());

static NOTE_WORDS_WITH_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)save|store|take|note|titled\s+["'][^"']+["']"#).unwrap());

static NOTE_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)save|store|take|note").unwrap());

const TITLE_WORDS: usize = 5;

const NO_NOTES: &str = "## 📝 Notes\n\nYou don't have any saved notes yet. You can create a note by saying something like 'Save a note titled \"Meeting Notes\" with the following content...'";

const NOTE_NOT_FOUND: &str = "## ❓ Note Not Found\n\nI couldn't find a note matching your description. Please say 'list all notes' to see your saved notes.";

/// Title and content derived from a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNote {
    pub title: String,
    pub content: String,
}

/// Derive a note's title and content from free text.
///
/// An explicit `titled "X"` wins. Otherwise the title is the first five
/// words of the content followed by `...`.
pub fn derive_note(text: &str) -> DerivedNote {
    if let Some(caps) = EXPLICIT_TITLE.captures(text) {
        return DerivedNote {
            title: caps[1].trim().to_string(),
            content: NOTE_WORDS_WITH_TITLE.replace_all(text, "").trim().to_string(),
        };
    }

    let content = NOTE_WORDS.replace_all(text, "").trim().to_string();
    let title = format!(
        "{}...",
        content
            .split(' ')
            .take(TITLE_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
    );
    DerivedNote { title, content }
}

/// Save a note from free text.
pub fn save_note(ctx: &mut Context<'_>, text: &str) -> String {
    let note = derive_note(text);
    let replaced = ctx
        .session
        .notes_mut()
        .save(note.title.clone(), note.content, ctx.now);
    if replaced {
        warn!(title = %note.title, "Note title collision, previous note overwritten");
    } else {
        debug!(title = %note.title, "Note saved");
    }

    let first_word = note.title.split(' ').next().unwrap_or_default();
    format!(
        "## 📝 Note Saved\n\nI've saved your note titled \"{}\".\n\nYou can retrieve it later by saying \"show me my note about {}\".",
        note.title, first_word
    )
}

/// Show the note a query refers to, or every note for "all notes".
pub fn retrieve_note(ctx: &mut Context<'_>, text: &str) -> String {
    let notes = ctx.session.notes();
    if notes.is_empty() {
        return NO_NOTES.to_string();
    }

    let lower = text.to_lowercase();
    if lower.contains("all notes") || lower.contains("list notes") {
        return list_notes(ctx);
    }

    match notes.find_mentioned(text) {
        Some(note) => format!(
            "## 📝 Note: \"{}\"\n\n*Created on {}*\n\n{}",
            note.title,
            format_date(note.created_at, ctx.now),
            note.content
        ),
        None => NOTE_NOT_FOUND.to_string(),
    }
}

/// Numbered list of every note title.
pub fn list_notes(ctx: &mut Context<'_>) -> String {
    let notes = ctx.session.notes();
    if notes.is_empty() {
        return "## 📝 Notes\n\nYou don't have any saved notes yet.".to_string();
    }

    let mut response = String::from("## 📝 Your Notes\n\n");
    for (index, note) in notes.iter().enumerate() {
        response.push_str(&format!(
            "{}. **{}** (created on {})\n",
            index + 1,
            note.title,
            format_date(note.created_at, ctx.now)
        ));
    }
    response.push_str("\nYou can retrieve a note by saying 'Show me my note about [title]'.");
    response
}
