//! Shared text helpers for the handlers.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

// ASCII word characters, matching the tokenization of the summarizer.
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").unwrap());

/// The trimmed remainder of `text` after the first case-insensitive
/// occurrence of `phrase`.
pub(crate) fn text_after<'a>(text: &'a str, phrase: &str) -> Option<&'a str> {
    let pattern = Regex::new(&format!("(?i){}", regex::escape(phrase))).ok()?;
    pattern.find(text).map(|m| text[m.end()..].trim())
}

/// Sentences terminated by `.`, `!` or `?`. Trailing unterminated text is
/// not a sentence.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    SENTENCE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Lower-cased words of `text`.
pub(crate) fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}
