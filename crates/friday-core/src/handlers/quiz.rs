//! Quiz generation from a topic or from the latest note.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use tracing::debug;

use super::text::{sentences, text_after};
use super::Context;
use crate::types::QuizQuestion;

const QUIZ_LENGTH: usize = 5;
const MIN_NOTE_SENTENCES: usize = 3;
const MIN_NOTE_QUESTIONS: usize = 3;
const MIN_SENTENCE_WORDS: usize = 5;

static QUIZ_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)quiz|generate|questions|test me").unwrap());

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

const TOPIC_NEEDED: &str = "## ❓ Topic Needed\n\nI need a topic to generate a quiz. Please specify a topic or save a note first that I can use to create questions.";

const NOTE_TOO_SHORT: &str =
    "The content is too short to generate a meaningful quiz. Please provide more detailed notes.";

pub const NO_QUIZ: &str =
    "## ❓ No Quiz Found\n\nI don't have any recent quiz answers saved. Please generate a quiz first.";

const REFER_TO_NOTES: &str = "Refer to your notes for the answer.";

/// Built-in question banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum QuizCategory {
    History,
    Science,
    Math,
    Literature,
    Geography,
    #[strum(serialize = "computer science")]
    ComputerScience,
    Productivity,
}

impl QuizCategory {
    /// Whether `topic` (lower-cased) names this category.
    fn named_in(&self, topic: &str) -> bool {
        match self {
            Self::ComputerScience => {
                topic.contains("computer science") || topic.contains("computer-science")
            }
            other => topic.contains(other.as_ref()),
        }
    }

    /// The category's five fixed questions.
    pub fn questions(&self) -> Vec<QuizQuestion> {
        let pairs: &[(&str, &str)] = match self {
            Self::History => &[
                ("What year did World War II end?", "1945"),
                ("Who was the first President of the United States?", "George Washington"),
                ("Which empire was ruled by Genghis Khan?", "Mongol Empire"),
                (
                    "What was the name of the conflict between the North and South in the United States?",
                    "The Civil War",
                ),
                (
                    "Which country was the first to circumnavigate the globe?",
                    "Spain (expedition led by Ferdinand Magellan and completed by Juan Sebastián Elcano)",
                ),
            ],
            Self::Science => &[
                ("What is the chemical symbol for gold?", "Au"),
                ("What is the closest planet to the Sun?", "Mercury"),
                ("What is the hardest natural substance on Earth?", "Diamond"),
                ("What is the process by which plants make their food called?", "Photosynthesis"),
                ("What is the unit of electrical resistance?", "Ohm"),
            ],
            Self::Math => &[
                ("What is the value of π (pi) to two decimal places?", "3.14"),
                ("What is the Pythagorean theorem?", "a² + b² = c²"),
                ("What is the square root of 144?", "12"),
                ("What is the formula for the area of a circle?", "A = πr²"),
                ("What is the sum of angles in a triangle?", "180 degrees"),
            ],
            Self::Literature => &[
                ("Who wrote 'Romeo and Juliet'?", "William Shakespeare"),
                ("What is the name of the main character in 'The Great Gatsby'?", "Jay Gatsby"),
                ("Who wrote '1984'?", "George Orwell"),
                (
                    "What is the first book in J.K. Rowling's series?",
                    "Harry Potter and the Philosopher's Stone (or Sorcerer's Stone in the US)",
                ),
                ("Who is the author of 'To Kill a Mockingbird'?", "Harper Lee"),
            ],
            Self::Geography => &[
                ("What is the largest ocean on Earth?", "Pacific Ocean"),
                ("What is the capital of Japan?", "Tokyo"),
                (
                    "Which river is the longest in the world?",
                    "Nile River (although some sources say the Amazon River)",
                ),
                (
                    "What is the largest desert in the world?",
                    "Antarctic Desert (if considering only hot deserts, then the Sahara)",
                ),
                (
                    "Which country has the largest population?",
                    "China (although India is very close and may have surpassed it recently)",
                ),
            ],
            Self::ComputerScience => &[
                ("What does CPU stand for?", "Central Processing Unit"),
                ("What programming language is known for its use in web browsers?", "JavaScript"),
                ("What does HTML stand for?", "HyperText Markup Language"),
                ("What is the binary code for the letter 'A' in ASCII?", "01000001"),
                (
                    "What is the primary function of an operating system?",
                    "To manage hardware resources and provide services for computer programs",
                ),
            ],
            Self::Productivity => &[
                (
                    "What is the Pomodoro Technique?",
                    "A time management method using 25-minute work intervals separated by short breaks",
                ),
                ("What does GTD stand for in productivity systems?", "Getting Things Done"),
                (
                    "What is the 2-minute rule in productivity?",
                    "If a task takes less than 2 minutes, do it immediately rather than scheduling it for later",
                ),
                (
                    "What is the Eisenhower Matrix used for?",
                    "Prioritizing tasks based on urgency and importance",
                ),
                (
                    "What is the concept of 'deep work'?",
                    "The ability to focus without distraction on a cognitively demanding task",
                ),
            ],
        };
        pairs
            .iter()
            .map(|(q, a)| QuizQuestion::new(*q, *a))
            .collect()
    }
}

/// The category with the longest name contained in `topic`. Equal lengths
/// keep the earlier category.
pub fn match_category(topic: &str) -> Option<QuizCategory> {
    let topic = topic.to_lowercase();
    QuizCategory::iter()
        .filter(|c| c.named_in(&topic))
        .fold(None, |best: Option<QuizCategory>, c| match best {
            Some(b) if b.as_ref().len() >= c.as_ref().len() => Some(b),
            _ => Some(c),
        })
}

/// Handle a quiz request.
pub fn generate_quiz(ctx: &mut Context<'_>, text: &str) -> String {
    let topic = extract_topic(text);
    if !topic.is_empty() {
        let questions = topic_questions(&topic, &mut *ctx.rng);
        let listing = render_questions(&questions);
        ctx.session.set_quiz(questions);
        return format!(
            "## 📚 Quiz: {}\n\n{}\n\nTo see the answers, just ask me \"show quiz answers\".",
            topic, listing
        );
    }

    let Some(note) = ctx.session.notes().latest().cloned() else {
        return TOPIC_NEEDED.to_string();
    };

    debug!(title = %note.title, "Generating quiz from latest note");
    let body = match note_questions(&note.content, &note.title) {
        Some(questions) => {
            let listing = render_questions(&questions);
            ctx.session.set_quiz(questions);
            listing
        }
        None => NOTE_TOO_SHORT.to_string(),
    };
    format!("## 📚 Quiz: {}\n\n{}", note.title, body)
}

fn extract_topic(text: &str) -> String {
    let lower = text.to_lowercase();
    let topic = ["quiz on", "test me on", "generate questions about"]
        .iter()
        .find(|phrase| lower.contains(*phrase))
        .and_then(|phrase| text_after(text, phrase));
    match topic {
        Some(topic) => topic.to_string(),
        None if lower.contains("quiz") => QUIZ_WORDS.replace_all(text, "").trim().to_string(),
        None => String::new(),
    }
}

/// Questions for a topic: a whole category bank, or a shuffled mix with
/// one random question per category.
pub fn topic_questions<R: Rng + ?Sized>(topic: &str, rng: &mut R) -> Vec<QuizQuestion> {
    if let Some(category) = match_category(topic) {
        return category.questions();
    }

    let mut mix: Vec<QuizQuestion> = QuizCategory::iter()
        .filter_map(|c| {
            let bank = c.questions();
            let index = rng.gen_range(0..bank.len());
            bank.into_iter().nth(index)
        })
        .collect();
    mix.shuffle(rng);
    mix.truncate(QUIZ_LENGTH);
    mix
}

/// Questions generated from note content. `None` when the content has
/// fewer than three sentences.
pub fn note_questions(content: &str, title: &str) -> Option<Vec<QuizQuestion>> {
    let sentences = sentences(content);
    if sentences.len() < MIN_NOTE_SENTENCES {
        return None;
    }

    let mut questions: Vec<QuizQuestion> = sentences
        .iter()
        .filter(|s| is_important(s))
        .filter_map(|s| question_from_sentence(s))
        .take(QUIZ_LENGTH)
        .collect();

    if questions.len() < MIN_NOTE_QUESTIONS {
        questions.extend([
            QuizQuestion::new(format!("What is the main topic of \"{}\"?", title), REFER_TO_NOTES),
            QuizQuestion::new(format!("List three key points from \"{}\".", title), REFER_TO_NOTES),
            QuizQuestion::new(
                format!("How would you summarize \"{}\" in one sentence?", title),
                REFER_TO_NOTES,
            ),
        ]);
    }
    Some(questions)
}

// Substring checks: "this" counts as containing "is".
fn is_important(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    ["is", "are", "was", "were", "defined as", "means", "refers to"]
        .iter()
        .any(|k| lower.contains(k))
        || DIGITS.is_match(&lower)
}

fn question_from_sentence(sentence: &str) -> Option<QuizQuestion> {
    if sentence.split(' ').count() < MIN_SENTENCE_WORDS {
        return None;
    }

    let lower = sentence.to_lowercase();
    let trimmed = sentence.trim();
    let answer = trimmed.to_string();

    let structural = if lower.contains(" is ") {
        Some((" is ", "What is {}?"))
    } else if lower.contains(" are ") {
        Some((" are ", "What are {}?"))
    } else if lower.contains(" was ") {
        Some((" was ", "What was {}?"))
    } else if lower.contains(" means ") {
        Some((" means ", "What does {} mean?"))
    } else if lower.contains(" refers to ") {
        Some((" refers to ", "What does {} mean?"))
    } else {
        None
    };

    let question = match structural {
        Some((separator, template)) => match sentence.split_once(separator) {
            Some((subject, _)) if !subject.is_empty() => {
                template.replacen("{}", subject.trim(), 1)
            }
            // Keyword only present with different casing.
            _ => format!("Explain this concept: \"{}\"", trimmed),
        },
        None if DIGITS.is_match(&lower) => format!(
            "What fact is associated with the numbers in this statement: \"{}\"?",
            trimmed
        ),
        None => format!("Explain this concept: \"{}\"", trimmed),
    };

    Some(QuizQuestion::new(question, answer))
}

fn render_questions(questions: &[QuizQuestion]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(index, q)| format!("{}. {}\n", index + 1, q.question))
        .collect()
}

/// Render the answers of the most recent quiz.
pub fn show_quiz_answers(ctx: &mut Context<'_>) -> String {
    let Some(questions) = ctx.session.quiz() else {
        return NO_QUIZ.to_string();
    };

    let mut response = String::from("## 📝 Quiz Answers\n\n");
    for (index, q) in questions.iter().enumerate() {
        response.push_str(&format!(
            "**{}. {}**\n   Answer: {}\n\n",
            index + 1,
            q.question,
            q.answer
        ));
    }
    response
}
