//! Canned replies for input no intent rule claimed.
//!
//! Rows are checked in order by substring containment on the lower-cased
//! input, so "this" answers as a greeting because it contains "hi".

use chrono::NaiveDateTime;
use rand::seq::SliceRandom;
use rand::Rng;

use super::format::{format_clock, format_day};
use super::quiz::show_quiz_answers;
use super::Context;

pub const JOKES: [&str; 5] = [
    "Why don't scientists trust atoms? Because they make up everything!",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "What do you call a fake noodle? An impasta!",
    "How does a computer get drunk? It takes screenshots!",
    "Why couldn't the bicycle stand up by itself? It was two tired!",
];

const GREETING: &str = "## 👋 Hello!\n\nHello there! How can I assist you today? I can help with tasks, notes, summarization, quizzes, or productivity tips.";

const WELLBEING: &str = "## 😊 I'm Great!\n\nI'm functioning perfectly! Thanks for asking. How about you? Is there anything I can help you with today?";

const WEATHER: &str = "## 🌤️ Weather\n\nI'm not connected to a weather service yet, but I'd be happy to help with tasks, notes, or productivity tips!";

const ABOUT: &str = "## 🤖 About Me\n\nI'm FRIDAY LITE, your personal AI assistant. Named after Tony Stark's AI, but a bit more lightweight! I can help you manage tasks, take notes, generate quizzes, and provide productivity tips.";

const THANKS: &str = "## 😊 You're Welcome!\n\nYou're welcome! I'm happy to help. Is there anything else you need assistance with?";

const FAREWELL: &str = "## 👋 Goodbye\n\nGoodbye! Feel free to chat again whenever you need assistance with your tasks or studies.";

pub const HELP: &str = concat!(
    "## 🌟 FRIDAY LITE Capabilities\n\nI can help you with several things:\n\n",
    "### 📋 **Task Management**\n",
    "- \"Remind me to call mom tomorrow at 5pm\"\n",
    "- \"Show my tasks\"\n",
    "- \"Mark task 2 as complete\"\n\n",
    "### 📝 **Notes**\n",
    "- \"Take a note titled 'Meeting Notes' with the following content...\"\n",
    "- \"Show me my notes\"\n",
    "- \"Show me my note about meeting\"\n\n",
    "### 📚 **Study Assistance**\n",
    "- \"Summarize this: [paste text]\"\n",
    "- \"Generate a quiz on history\"\n",
    "- \"Create a quiz from my latest note\"\n\n",
    "### ⚡ **Productivity**\n",
    "- \"Give me a productivity tip\"\n\n",
    "Just let me know what you need help with!"
);

pub const NOT_SURE: &str = "## 🤔 I'm Not Sure\n\nI understand you're trying to communicate with me, but I'm not sure how to help with that specific request. I can assist with task management, note-taking, summarization, quiz generation, and productivity tips. Try asking something like \"What can you do?\" for more information.";

/// Outcome of the canned-response table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Canned {
    /// A complete reply.
    Reply(String),
    /// The input asks for the latest quiz's answers, which live in the session.
    QuizAnswers,
}

/// Look `text` up in the canned-response table.
pub fn canned<R: Rng + ?Sized>(text: &str, now: NaiveDateTime, rng: &mut R) -> Canned {
    let input = text.to_lowercase();
    let has = |needle: &str| input.contains(needle);

    let reply = if has("hello") || has("hi") {
        GREETING.to_string()
    } else if has("how are you") {
        WELLBEING.to_string()
    } else if has("weather") {
        WEATHER.to_string()
    } else if has("name") {
        ABOUT.to_string()
    } else if has("thank") {
        THANKS.to_string()
    } else if has("bye") || has("goodbye") {
        FAREWELL.to_string()
    } else if has("time") {
        format!("## ⏰ Current Time\n\nThe current time is {}.", format_clock(now))
    } else if has("date") {
        format!("## 📅 Today's Date\n\nToday is {}.", format_day(now))
    } else if has("joke") {
        let joke = JOKES.choose(rng).copied().unwrap_or_default();
        format!("## 😂 Here's a Joke\n\n{}", joke)
    } else if has("quiz answers") || has("show answers") {
        return Canned::QuizAnswers;
    } else if has("help") || has("what can you do") {
        HELP.to_string()
    } else {
        NOT_SURE.to_string()
    };
    Canned::Reply(reply)
}

/// Answer unmatched input from the canned table, reading quiz answers
/// from the session.
pub fn smalltalk_reply(ctx: &mut Context<'_>, text: &str) -> String {
    match canned(text, ctx.now, &mut *ctx.rng) {
        Canned::Reply(reply) => reply,
        Canned::QuizAnswers => show_quiz_answers(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::quiz::generate_quiz;
    use crate::handlers::tests::fixture;

    fn reply(text: &str) -> String {
        let mut fx = fixture();
        smalltalk_reply(&mut fx.ctx(), text)
    }

    #[test]
    fn test_table_order() {
        assert!(reply("Hello there").starts_with("## 👋 Hello!"));
        // "this" contains "hi".
        assert!(reply("what is this").starts_with("## 👋 Hello!"));
        assert!(reply("how are you").starts_with("## 😊 I'm Great!"));
        assert!(reply("what's your name").starts_with("## 🤖 About Me"));
        assert!(reply("goodbye").starts_with("## 👋 Goodbye"));
        assert!(reply("can you help").starts_with("## 🌟 FRIDAY LITE Capabilities"));
        assert_eq!(reply("xyzzy"), NOT_SURE);
    }

    #[test]
    fn test_time_and_date_use_clock() {
        assert_eq!(reply("what time"), "## ⏰ Current Time\n\nThe current time is 9:30:00 AM.");
        assert_eq!(reply("today's date"), "## 📅 Today's Date\n\nToday is 5/6/2024.");
    }

    #[test]
    fn test_joke_is_one_of_five() {
        let joke = reply("tell me a joke");
        assert!(JOKES.iter().any(|j| joke.ends_with(j)));
    }

    #[test]
    fn test_quiz_answers_row_reads_session() {
        let mut fx = fixture();
        assert!(smalltalk_reply(&mut fx.ctx(), "quiz answers please").contains("No Quiz Found"));

        generate_quiz(&mut fx.ctx(), "quiz on geography");
        let answers = smalltalk_reply(&mut fx.ctx(), "quiz answers please");
        assert!(answers.contains("Answer: Pacific Ocean"));
    }
}
