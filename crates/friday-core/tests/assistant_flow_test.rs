//! End-to-end conversations through the assistant.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use friday_core::store::MemoryStore;
use friday_core::{Assistant, FixedClock, Intent, ReplyDelayConfig, Sender};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assistant() -> (Assistant, Arc<FixedClock>) {
    let now = NaiveDate::from_ymd_opt(2024, 5, 6)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let clock = Arc::new(FixedClock::new(now));
    let assistant = Assistant::new(Arc::new(MemoryStore::new()), clock.clone())
        .with_rng(StdRng::seed_from_u64(11))
        .with_reply_delay(ReplyDelayConfig::none());
    (assistant, clock)
}

#[tokio::test]
async fn test_task_lifecycle() {
    let (mut assistant, _) = assistant();

    let reply = assistant
        .respond("Remind me to call mom on friday")
        .await
        .unwrap()
        .unwrap();
    assert!(reply.contains("\"call mom\" due on 5/10/2024 at 09:00 AM"));

    assistant.respond("add task buy milk").await.unwrap();
    let reply = assistant.respond("mark task buy milk as done").await.unwrap().unwrap();
    assert!(reply.contains("\"buy milk\" as complete"));

    let listing = assistant.respond("show my tasks").await.unwrap().unwrap();
    assert!(listing.contains("### 📝 Pending Tasks\n1. call mom (Due: 5/10/2024 at 09:00 AM)\n"));
    assert!(listing.contains("### ✅ Completed Tasks\n1. buy milk\n"));
}

#[tokio::test]
async fn test_note_then_quiz_from_note() {
    let (mut assistant, clock) = assistant();
    assistant
        .respond(
            "save a note titled \"Cells\" The nucleus is the control center of the cell. \
             Mitochondria are organelles that produce energy. \
             The first cell was observed in 1665.",
        )
        .await
        .unwrap();

    clock.advance(Duration::minutes(5));
    let quiz = assistant.respond("quiz").await.unwrap().unwrap();
    assert!(quiz.starts_with("## 📚 Quiz: Cells\n\n1. "));

    let answers = assistant.respond("show quiz answers").await.unwrap().unwrap();
    assert!(answers.starts_with("## 📝 Quiz Answers"));
}

#[tokio::test]
async fn test_summary_and_fallback() {
    let (mut assistant, _) = assistant();
    let reply = assistant.respond("summarize this: too short").await.unwrap().unwrap();
    assert!(reply.contains("Text Too Short"));

    assert_eq!(assistant.classify("what can you do"), Intent::Fallback);
    let help = assistant.respond("what can you do").await.unwrap().unwrap();
    assert!(help.starts_with("## 🌟 FRIDAY LITE Capabilities"));

    let log = assistant.messages();
    assert_eq!(log.last().unwrap().sender, Sender::Assistant);
    assert_eq!(log[log.len() - 2].text, "what can you do");
}
