use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::{StateError, StateStore};

/// State store backed by a pretty-printed JSON document on disk.
///
/// The document is read once at construction; `persist` rewrites it whole.
/// A missing file yields an empty store and a corrupt one is replaced after
/// a warning, so a mangled document never wedges the charm.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl FileStateStore {
    /// Opens the store at `path`, loading the existing document if present.
    ///
    /// # Errors
    /// Returns [`StateError::Persistence`] if the file exists but cannot be
    /// read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StateError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|err| StateError::Persistence {
                path: path.clone(),
                details: err.to_string(),
            })?;
            match serde_json::from_str(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    warn!(path = %path.display(), "state file is not a JSON object, starting fresh");
                    Map::new()
                }
            }
        } else {
            info!(path = %path.display(), "no state file found, starting empty");
            Map::new()
        };

        Ok(Self { path, entries })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn persist(&mut self) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StateError::Persistence {
                path: self.path.clone(),
                details: err.to_string(),
            })?;
        }

        let content =
            serde_json::to_string_pretty(&self.entries).map_err(|err| StateError::Serialization {
                details: err.to_string(),
            })?;

        fs::write(&self.path, content).map_err(|err| StateError::Persistence {
            path: self.path.clone(),
            details: err.to_string(),
        })
    }
}
