//! Charm configuration: the raw option snapshot delivered by the host and
//! the typed view of the options this charm declares.
//!
//! Options are defined externally, in `config.yaml`; the host owns the
//! schema and hands the charm a flat key/value snapshot on every invocation.
//! Delta detection between two snapshots lives in [`changed_options`].

mod diff;

#[cfg(test)]
mod tests;

pub use diff::changed_options;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Flat option mapping as returned by the host's `config-get` tool.
///
/// Values may be strings, numbers, booleans, or compound JSON values.
/// The snapshot is immutable for the duration of one event.
pub type ConfigSnapshot = Map<String, Value>;

/// Errors raised while interpreting the host-supplied option snapshot.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A declared option is missing from the snapshot.
    #[error("required option '{option}' missing from the config snapshot")]
    MissingOption {
        /// Name of the missing option.
        option: String,
    },

    /// An option is present but holds a value of the wrong type.
    #[error("option '{option}' expected a {expected}, got {actual}")]
    WrongType {
        /// Name of the offending option.
        option: String,
        /// Expected JSON type name.
        expected: &'static str,
        /// The value actually found in the snapshot.
        actual: Value,
    },
}

/// Typed view of the options this charm declares in `config.yaml`.
///
/// Defaults live in `config.yaml` and are applied by the host before the
/// snapshot reaches the charm, so every declared option is expected to be
/// present here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CharmConfig {
    /// First demo option; copied into stored state on config-changed.
    pub alice: String,
    /// Second demo option; copied into stored state on config-changed.
    pub bobob: String,
    /// Workload status message displayed once config-changed completes.
    pub message: String,
}

impl CharmConfig {
    /// Builds the typed view from a raw snapshot.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingOption`] if a declared option is absent
    /// and [`ConfigError::WrongType`] if one is not a string.
    pub fn from_snapshot(snapshot: &ConfigSnapshot) -> Result<Self, ConfigError> {
        Ok(Self {
            alice: string_option(snapshot, "alice")?,
            bobob: string_option(snapshot, "bobob")?,
            message: string_option(snapshot, "message")?,
        })
    }

    /// Snapshot carrying the same defaults `config.yaml` declares.
    ///
    /// Dry runs have no host to deliver a snapshot; this stands in for one.
    pub fn default_snapshot() -> ConfigSnapshot {
        let mut snapshot = ConfigSnapshot::new();
        snapshot.insert("alice".to_string(), Value::String("wonderland".to_string()));
        snapshot.insert("bobob".to_string(), Value::String("builder".to_string()));
        snapshot.insert(
            "message".to_string(),
            Value::String("demo is running".to_string()),
        );
        snapshot
    }
}

fn string_option(snapshot: &ConfigSnapshot, option: &str) -> Result<String, ConfigError> {
    let value = snapshot
        .get(option)
        .ok_or_else(|| ConfigError::MissingOption {
            option: option.to_string(),
        })?;

    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::WrongType {
            option: option.to_string(),
            expected: "string",
            actual: value.clone(),
        })
}
