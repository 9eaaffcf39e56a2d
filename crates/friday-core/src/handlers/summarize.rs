//! Extractive summarization by keyword frequency and sentence position.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::{sentences, text_after, words};

/// Inputs shorter than this (in characters) are not summarized.
pub const MIN_SUMMARY_INPUT_CHARS: usize = 50;

const KEYWORD_COUNT: usize = 10;
const MIN_SENTENCES: usize = 3;
const MAX_SENTENCES: usize = 5;
const SELECTION_RATIO: f64 = 0.3;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "with", "by", "about",
    "as", "of", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "should", "can", "could", "may", "might", "must", "shall",
    "this", "that", "these", "those", "it", "its", "they", "them", "their", "he", "him", "his",
    "she", "her", "hers", "we", "us", "our", "you", "your", "yours", "i", "me", "my", "mine",
];

static SUMMARIZE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)summarize").unwrap());

const TOO_SHORT: &str = "## ❓ Text Too Short\n\nThe text you provided is too short to summarize. Please provide a longer text or lecture notes to summarize.";

/// Handle a summarization request.
pub fn summarize_request(text: &str) -> String {
    let content = extract_content(text);
    if content.chars().count() < MIN_SUMMARY_INPUT_CHARS {
        return TOO_SHORT.to_string();
    }
    format!("## 📚 Summary\n\n{}", summarize(&content))
}

fn extract_content(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.contains("summarize this:") {
        text_after(text, "summarize this:").unwrap_or_default().to_string()
    } else if lower.contains("summary of:") {
        text_after(text, "summary of:").unwrap_or_default().to_string()
    } else if lower.contains("summarize") {
        SUMMARIZE_WORD.replace_all(text, "").trim().to_string()
    } else {
        String::new()
    }
}

#[derive(Debug)]
struct ScoredSentence<'a> {
    index: usize,
    text: &'a str,
    score: f64,
}

/// Build an extractive summary of `text`.
///
/// Texts of three sentences or fewer come back unchanged.
pub fn summarize(text: &str) -> String {
    let sentences = sentences(text);
    if sentences.len() <= MIN_SENTENCES {
        return text.to_string();
    }

    let frequency = word_frequency(text);
    let keywords = top_keywords(&frequency);
    let count = sentences.len();

    let mut scored: Vec<ScoredSentence<'_>> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let sentence_words = words(sentence);
            let mut score = 0.0;
            for word in &sentence_words {
                if keywords.contains(&word.as_str()) {
                    score += 3.0;
                } else if let Some(&freq) = frequency.counts.get(word.as_str()) {
                    if freq > 1 {
                        score += freq as f64 / 2.0;
                    }
                }
            }

            if index < 2 {
                score *= 1.5;
            } else if index + 2 >= count {
                score *= 1.25;
            }

            let length = sentence_words.len();
            if length > 5 && length < 25 {
                score *= 1.2;
            } else if length >= 25 {
                score *= 0.8;
            }

            ScoredSentence {
                index,
                text: sentence,
                score,
            }
        })
        .collect();

    // Stable: equal scores keep document order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let take = selection_size(count);
    let threshold = scored[take / 2].score;
    let mut selected: Vec<&ScoredSentence<'_>> = scored.iter().take(take).collect();
    selected.sort_by_key(|s| s.index);

    let mut summary = selected
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join(" ");

    let last_index = count - 1;
    if !selected.iter().any(|s| s.index == last_index) {
        if let Some(last) = scored.iter().find(|s| s.index == last_index) {
            if last.score > threshold {
                summary.push(' ');
                summary.push_str(last.text.trim());
            }
        }
    }

    summary
}

/// Number of sentences to keep: 30% of the text, clamped to 3..=5.
pub fn selection_size(sentence_count: usize) -> usize {
    let ratio = (sentence_count as f64 * SELECTION_RATIO).ceil() as usize;
    ratio.clamp(MIN_SENTENCES, MAX_SENTENCES)
}

struct Frequency {
    counts: HashMap<String, usize>,
    // First-seen order, used to break ties between equal counts.
    order: Vec<String>,
}

fn word_frequency(text: &str) -> Frequency {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();
    for word in words(text) {
        if word.len() <= 2 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        let entry = counts.entry(word.clone()).or_insert(0);
        if *entry == 0 {
            order.push(word);
        }
        *entry += 1;
    }
    Frequency { counts, order }
}

fn top_keywords(frequency: &Frequency) -> Vec<&str> {
    let mut ranked: Vec<&str> = frequency.order.iter().map(String::as_str).collect();
    ranked.sort_by(|a, b| frequency.counts[*b].cmp(&frequency.counts[*a]));
    ranked.truncate(KEYWORD_COUNT);
    ranked
}
