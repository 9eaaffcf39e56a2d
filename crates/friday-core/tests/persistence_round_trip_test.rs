//! Integration tests for session persistence.
//!
//! Every backend must hand back structurally identical collections after a
//! restart.

use std::sync::Arc;

use chrono::NaiveDate;
use friday_core::store::{JsonFileStore, MemoryStore, SqliteStore};
use friday_core::{Assistant, FixedClock, KeyValueStore, ReplyDelayConfig, Theme};

fn clock() -> Arc<FixedClock> {
    let now = NaiveDate::from_ymd_opt(2024, 5, 6)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    Arc::new(FixedClock::new(now))
}

async fn populate(store: Arc<dyn KeyValueStore>) -> Assistant {
    let mut assistant =
        Assistant::new(store, clock()).with_reply_delay(ReplyDelayConfig::none());
    assistant.respond("Remind me to call mom by tomorrow").await.unwrap();
    assistant.respond("add task water plants").await.unwrap();
    assistant.respond("complete task 1").await.unwrap();
    assistant
        .respond("save a note titled \"Physics\" energy is conserved")
        .await
        .unwrap();
    assistant.respond("quiz on science").await.unwrap();
    assistant.set_theme(Theme::Dark);
    assistant
}

async fn assert_round_trip(store: Arc<dyn KeyValueStore>) {
    let before = populate(store.clone()).await;
    let after = Assistant::new(store, clock());

    assert_eq!(after.messages(), before.messages());
    assert_eq!(after.session().tasks(), before.session().tasks());
    assert_eq!(after.session().notes(), before.session().notes());
    assert_eq!(after.session().quiz(), before.session().quiz());
    assert_eq!(after.theme(), Theme::Dark);
}

#[tokio::test]
async fn test_memory_store_round_trip() {
    assert_round_trip(Arc::new(MemoryStore::new())).await;
}

#[tokio::test]
async fn test_json_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    assert_round_trip(Arc::new(JsonFileStore::new(dir.path()).unwrap())).await;
}

#[tokio::test]
async fn test_sqlite_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("friday.db");
    assert_round_trip(Arc::new(SqliteStore::new(&path).unwrap())).await;
}

#[tokio::test]
async fn test_corrupt_snapshot_is_skipped() {
    let store = Arc::new(MemoryStore::new());
    store.save("tasks", "not json").unwrap();
    store.save("notes", r#"[{"title":"T","content":"c","created_at":"2024-05-01T08:00:00"}]"#).unwrap();

    let assistant = Assistant::new(store, clock());
    assert!(assistant.session().tasks().is_empty());
    assert_eq!(assistant.session().notes().get("T").unwrap().content, "c");
    assert!(assistant.messages()[0].is_welcome());
}

#[tokio::test]
async fn test_ids_resume_after_restart() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let before = populate(store.clone()).await;
    let last_id: i64 = before.messages().last().unwrap().id.parse().unwrap();

    let mut after = Assistant::new(store, clock());
    after.respond("add task one more").await.unwrap();
    let new_id: i64 = after.session().tasks().last().unwrap().id.parse().unwrap();
    assert!(new_id > last_id);
}
