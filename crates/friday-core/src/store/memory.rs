//! In-process store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{FridayError, FridayResult};
use crate::traits::KeyValueStore;

/// Store that keeps values in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&self, key: &str, value: &str) -> FridayResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| FridayError::storage("memory store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> FridayResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| FridayError::storage("memory store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
