//! Key-value persistence trait.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::error::FridayResult;

/// Names under which the session collections are persisted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum StoreKey {
    Messages,
    Tasks,
    Notes,
    QuizAnswers,
    Theme,
}

/// Opaque string store: save and load whole snapshots by name.
pub trait KeyValueStore: Send + Sync {
    /// Replace the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> FridayResult<()>;

    /// The value stored under `key`, if any.
    fn load(&self, key: &str) -> FridayResult<Option<String>>;

    /// Backend name for logs.
    fn backend_name(&self) -> &str;
}

/// Serialize `value` as JSON and save it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: StoreKey,
    value: &T,
) -> FridayResult<()> {
    let json = serde_json::to_string(value)?;
    store.save(key.as_ref(), &json)
}

/// Load and deserialize the JSON stored under `key`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StoreKey,
) -> FridayResult<Option<T>> {
    match store.load(key.as_ref())? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
