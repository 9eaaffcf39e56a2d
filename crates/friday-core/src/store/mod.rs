//! Key-value store backends.

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::FridayResult;
use crate::traits::KeyValueStore;

/// Create the store selected by `config`.
pub fn create_store(config: &StoreConfig) -> FridayResult<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Json => Arc::new(JsonFileStore::new(&config.path)?),
        StoreBackend::Sqlite => Arc::new(SqliteStore::new(&config.path)?),
    };
    info!(backend = store.backend_name(), path = %config.path.display(), "Store opened");
    Ok(store)
}
