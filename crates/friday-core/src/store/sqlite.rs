//! Key-value table in SQLite.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{ErrorCode, FridayError, FridayResult};
use crate::traits::KeyValueStore;

/// SQLite-based key-value store.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`. `:memory:` opens an
    /// in-memory database.
    pub fn new(db_path: impl AsRef<Path>) -> FridayResult<Self> {
        let db_path = db_path.as_ref();
        let conn = if db_path.to_str() == Some(":memory:") {
            Connection::open_in_memory()
        } else {
            // Ensure parent directory exists
            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Connection::open(db_path)
        }
        .map_err(|e| FridayError::Storage {
            message: e.to_string(),
            code: ErrorCode::StoOpenFailed,
            source: Some(Box::new(e)),
        })?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.create_table()?;
        Ok(store)
    }

    /// Create the key-value table if it doesn't exist.
    fn create_table(&self) -> FridayResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key          TEXT PRIMARY KEY,
                value        TEXT NOT NULL,
                updated_at   DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            [],
        )?;
        Ok(())
    }

    fn lock(&self) -> FridayResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| FridayError::storage("sqlite connection lock poisoned"))
    }
}

impl KeyValueStore for SqliteStore {
    fn save(&self, key: &str, value: &str) -> FridayResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    fn load(&self, key: &str) -> FridayResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| FridayError::Storage {
                message: e.to_string(),
                code: ErrorCode::StoReadFailed,
                source: Some(Box::new(e)),
            })?;
        Ok(value)
    }

    fn backend_name(&self) -> &str {
        "sqlite"
    }
}
