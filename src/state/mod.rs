//! Persisted charm state.
//!
//! The host guarantees that state survives process restarts; the charm is
//! solely responsible for its contents. Storage is injected through the
//! small [`StateStore`] interface so the handlers never know whether they
//! are writing to a real document on disk or to memory in a dry run.

mod file;

#[cfg(test)]
mod tests;

pub use file::FileStateStore;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::config::ConfigSnapshot;

/// Store key the charm's own state lives under.
const STATE_KEY: &str = "charm";

/// Errors raised by state store implementations.
#[derive(Debug, Error)]
pub enum StateError {
    /// Reading or writing the backing document failed.
    #[error("failed to persist state to '{path}': {details}")]
    Persistence {
        /// Path of the backing document.
        path: PathBuf,
        /// Underlying I/O error details.
        details: String,
    },

    /// The state could not be converted to or from JSON.
    #[error("failed to serialize state: {details}")]
    Serialization {
        /// Serialization error details.
        details: String,
    },
}

/// Key/value store that survives process restarts.
///
/// `set` only mutates the in-memory view; nothing is durable until
/// `persist`. Implementations decide what durability means: the file store
/// rewrites its JSON document, the in-memory store does nothing.
pub trait StateStore: Send {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` in the in-memory view.
    fn set(&mut self, key: &str, value: Value);

    /// Flushes the in-memory view to durable storage.
    ///
    /// # Errors
    /// Returns [`StateError`] when the backing storage cannot be written.
    fn persist(&mut self) -> Result<(), StateError>;
}

/// Volatile store for dry runs and tests.
///
/// Behaves like the file store minus durability: `persist` succeeds and
/// writes nothing.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: Map<String, Value>,
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn persist(&mut self) -> Result<(), StateError> {
        Ok(())
    }
}

/// Typed view of this charm's slice of the store.
///
/// Serialized as a single JSON object under the `charm` key so the raw store
/// stays a flat document other tooling can read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    /// Scratch values the handlers accumulate (`alice`, `bobob`, `folder`).
    #[serde(default)]
    pub things: Map<String, Value>,

    /// Recorded configuration baseline used for delta detection.
    #[serde(default)]
    pub config: ConfigSnapshot,

    /// Set once install completes; start refuses to act before that.
    #[serde(default)]
    pub initialized: bool,

    /// Events whose handlers asked for redelivery, replayed on the next
    /// dispatch in queue order.
    #[serde(default)]
    pub deferred: Vec<String>,
}

impl StoredState {
    /// Loads the typed view from `store`, falling back to defaults when the
    /// charm has stored nothing yet.
    ///
    /// A value that no longer deserializes is discarded with a warning
    /// rather than failing the dispatch.
    pub fn load(store: &dyn StateStore) -> Self {
        match store.get(STATE_KEY) {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
                warn!(error = %err, "stored state does not deserialize, starting fresh");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Writes the typed view back into `store` under the charm's key.
    ///
    /// # Errors
    /// Returns [`StateError::Serialization`] if the view cannot be converted
    /// to JSON.
    pub fn write(&self, store: &mut dyn StateStore) -> Result<(), StateError> {
        let value = serde_json::to_value(self).map_err(|err| StateError::Serialization {
            details: err.to_string(),
        })?;
        store.set(STATE_KEY, value);
        Ok(())
    }
}
