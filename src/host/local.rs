use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{ActionParams, HostError, Model, Status};
use crate::config::ConfigSnapshot;

/// In-process [`Model`] used in dry runs and tests.
///
/// Configuration and action parameters are supplied up front; everything a
/// handler reports back is recorded and can be inspected afterwards.
#[derive(Debug, Default)]
pub struct LocalHost {
    snapshot: ConfigSnapshot,
    action: Option<ActionParams>,
    recorded: Mutex<Recorded>,
}

#[derive(Debug, Default)]
struct Recorded {
    statuses: Vec<Status>,
    results: Vec<Map<String, Value>>,
    failures: Vec<String>,
}

impl LocalHost {
    /// Creates a host with empty configuration and no running action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration snapshot `config` will return.
    #[must_use]
    pub fn with_config(mut self, snapshot: ConfigSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Marks an action as running and sets its parameters.
    #[must_use]
    pub fn with_action_params(mut self, params: ActionParams) -> Self {
        self.action = Some(params);
        self
    }

    /// Statuses reported so far, oldest first.
    pub fn statuses(&self) -> Vec<Status> {
        self.recorded().statuses.clone()
    }

    /// Action results recorded so far, oldest first.
    pub fn results(&self) -> Vec<Map<String, Value>> {
        self.recorded().results.clone()
    }

    /// Action failure messages recorded so far, oldest first.
    pub fn failures(&self) -> Vec<String> {
        self.recorded().failures.clone()
    }

    fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Model for LocalHost {
    async fn config(&self) -> Result<ConfigSnapshot, HostError> {
        Ok(self.snapshot.clone())
    }

    async fn set_status(&self, status: Status) -> Result<(), HostError> {
        self.recorded().statuses.push(status);
        Ok(())
    }

    async fn action_params(&self) -> Result<ActionParams, HostError> {
        self.action.clone().ok_or(HostError::NoAction {
            operation: "action-get".to_string(),
        })
    }

    async fn set_action_results(&self, results: Map<String, Value>) -> Result<(), HostError> {
        if self.action.is_none() {
            return Err(HostError::NoAction {
                operation: "action-set".to_string(),
            });
        }
        self.recorded().results.push(results);
        Ok(())
    }

    async fn fail_action(&self, message: &str) -> Result<(), HostError> {
        if self.action.is_none() {
            return Err(HostError::NoAction {
                operation: "action-fail".to_string(),
            });
        }
        self.recorded().failures.push(message.to_string());
        Ok(())
    }
}
