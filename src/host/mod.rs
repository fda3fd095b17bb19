//! Host-facing surface of the charm.
//!
//! The [`Model`] trait is the only channel through which handlers talk to
//! the orchestrator: reading configuration, reporting workload status and
//! exchanging action data. [`ToolHost`] implements it over the hook-tool
//! binaries available inside a dispatch environment; [`LocalHost`] is an
//! in-process stand-in for dry runs and tests.

mod command;
mod local;
mod status;
mod tools;

#[cfg(test)]
mod tests;

pub use command::{CommandError, CommandOutput, run_command};
pub use local::LocalHost;
pub use status::Status;
pub use tools::ToolHost;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::ConfigSnapshot;

/// Parameters of an action invocation, keyed by parameter name.
pub type ActionParams = Map<String, Value>;

/// Errors raised while talking to the host.
#[derive(Error, Debug)]
pub enum HostError {
    /// A hook tool could not be invoked or reported failure.
    #[error("hook tool '{tool}' failed: {details}")]
    Tool {
        /// Name of the hook tool binary
        tool: String,
        /// Failure details
        details: String,
    },

    /// A hook tool produced output that could not be decoded.
    #[error("undecodable output from hook tool '{tool}': {details}")]
    Decode {
        /// Name of the hook tool binary
        tool: String,
        /// Decode error details
        details: String,
    },

    /// An action-scoped operation was used outside an action dispatch.
    #[error("'{operation}' is only available while an action is running")]
    NoAction {
        /// The operation that was attempted
        operation: String,
    },
}

/// Interface to the orchestrator that manages this unit.
///
/// Handlers never shell out to hook tools directly; everything they need
/// from the controlling model goes through this trait so that tests can
/// substitute [`LocalHost`].
#[async_trait]
pub trait Model: Send + Sync {
    /// Current application configuration as key/value pairs.
    async fn config(&self) -> Result<ConfigSnapshot, HostError>;

    /// Reports the unit's workload status.
    async fn set_status(&self, status: Status) -> Result<(), HostError>;

    /// Parameters of the action currently being dispatched.
    async fn action_params(&self) -> Result<ActionParams, HostError>;

    /// Records result key/value pairs for the running action.
    async fn set_action_results(&self, results: Map<String, Value>) -> Result<(), HostError>;

    /// Marks the running action as failed with `message`.
    async fn fail_action(&self, message: &str) -> Result<(), HostError>;
}
