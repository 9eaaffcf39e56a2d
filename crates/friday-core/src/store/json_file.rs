//! Directory of JSON files, one per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ErrorCode, FridayError, FridayResult};
use crate::traits::KeyValueStore;

/// Store that writes each key to `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> FridayResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| io_error(ErrorCode::StoOpenFailed, &dir, e))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> FridayResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(FridayError::validation(format!("invalid store key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(code: ErrorCode, path: &Path, err: std::io::Error) -> FridayError {
    FridayError::Storage {
        message: format!("{}: {}", path.display(), err),
        code,
        source: Some(Box::new(err)),
    }
}

impl KeyValueStore for JsonFileStore {
    fn save(&self, key: &str, value: &str) -> FridayResult<()> {
        let path = self.path_for(key)?;
        // Write then rename so a crash never leaves a half-written snapshot.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| io_error(ErrorCode::StoWriteFailed, &tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| io_error(ErrorCode::StoWriteFailed, &path, e))?;
        debug!(key, bytes = value.len(), "Snapshot written");
        Ok(())
    }

    fn load(&self, key: &str) -> FridayResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(ErrorCode::StoReadFailed, &path, e)),
        }
    }

    fn backend_name(&self) -> &str {
        "json"
    }
}
