//! Event model and dispatch plumbing.
//!
//! Lifecycle notifications arrive as a closed set of [`Event`] values.
//! Handlers implement [`Handler`] and are wired to their event through a
//! [`HandlerRegistry`]; dispatch hands each one a [`HookContext`] with the
//! model channel, the persistent state store and the charm's filesystem
//! layout.

mod registry;

#[cfg(test)]
mod tests;

pub use registry::HandlerRegistry;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

use crate::charm::CharmPaths;
use crate::config::ConfigError;
use crate::host::{CommandError, HostError, Model};
use crate::state::{StateError, StateStore};

/// Lifecycle notifications delivered to the charm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// First event after the unit is created; set up the workload.
    Install,
    /// Configuration may have changed and should be re-read.
    ConfigChanged,
    /// The workload should start serving.
    Start,
    /// An operator invoked one of the charm's actions.
    Action(ActionName),
}

/// Actions the charm advertises to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionName {
    /// Collects shell history for debugging.
    Debug,
    /// Demonstrates parameter handling and failure reporting.
    TestFortune,
}

impl Event {
    /// Kebab-case name of the event as the orchestrator spells it.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Install => "install",
            Event::ConfigChanged => "config-changed",
            Event::Start => "start",
            Event::Action(action) => action.name(),
        }
    }

    /// Resolves the event to dispatch from the environment prepared by the
    /// orchestrator.
    ///
    /// `JUJU_ACTION_NAME` wins over `JUJU_HOOK_NAME` when both are present.
    /// Neither being set yields `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`EventError`] when a variable is set but names an event or
    /// action this charm does not know.
    pub fn from_env() -> Result<Option<Self>, EventError> {
        if let Ok(name) = env::var("JUJU_ACTION_NAME")
            && !name.is_empty()
        {
            return ActionName::from_str(&name).map(|action| Some(Event::Action(action)));
        }

        if let Ok(name) = env::var("JUJU_HOOK_NAME")
            && !name.is_empty()
        {
            return Event::from_str(&name).map(Some);
        }

        Ok(None)
    }
}

impl ActionName {
    /// Kebab-case name of the action as declared in the charm metadata.
    pub fn name(&self) -> &'static str {
        match self {
            ActionName::Debug => "debug",
            ActionName::TestFortune => "test-fortune",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Event {
    type Err = EventError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "install" => Ok(Event::Install),
            "config-changed" => Ok(Event::ConfigChanged),
            "start" => Ok(Event::Start),
            other => ActionName::from_str(other)
                .map(Event::Action)
                .map_err(|_| EventError::UnknownEvent {
                    name: name.to_string(),
                }),
        }
    }
}

impl FromStr for ActionName {
    type Err = EventError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "debug" => Ok(ActionName::Debug),
            "test-fortune" => Ok(ActionName::TestFortune),
            _ => Err(EventError::UnknownAction {
                name: name.to_string(),
            }),
        }
    }
}

/// Errors from resolving event names.
#[derive(Error, Debug)]
pub enum EventError {
    /// The name matches no known lifecycle event or action.
    #[error("unknown event '{name}'")]
    UnknownEvent {
        /// The unresolvable name
        name: String,
    },

    /// The name matches no action this charm declares.
    #[error("unknown action '{name}'")]
    UnknownAction {
        /// The unresolvable name
        name: String,
    },
}

/// Outcome of handling a single event delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The handler finished and the event is consumed.
    Completed,
    /// The handler could not proceed; the event is replayed before the
    /// next dispatch.
    Deferred,
}

/// Everything a handler may touch while processing an event.
pub struct HookContext<'a> {
    /// Channel to the orchestrator.
    pub model: &'a dyn Model,
    /// Unit-local persistent state.
    pub state: &'a mut dyn StateStore,
    /// Filesystem layout of the charm.
    pub paths: &'a CharmPaths,
}

/// A handler for one lifecycle event.
///
/// Handlers own no long-lived resources; all interaction with the outside
/// world goes through the [`HookContext`] passed to `handle`.
#[async_trait]
pub trait Handler: Send + Sync {
    /// The event this handler reacts to.
    fn event(&self) -> Event;

    /// Processes one delivery of the event.
    ///
    /// # Errors
    /// Returns [`HookError`] when the handler cannot complete; the dispatch
    /// as a whole fails and the orchestrator will retry the event.
    async fn handle(&self, ctx: &mut HookContext<'_>) -> Result<Dispatch, HookError>;
}

/// Errors raised by event handlers.
#[derive(Error, Debug)]
pub enum HookError {
    /// Configuration was missing an option or carried a wrong type.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Talking to the orchestrator failed.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// Persistent state could not be read or written.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// A host command could not be run to completion.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// A filesystem operation failed.
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path where the failure occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Stored state is missing a key the handler relies on.
    #[error("stored state has no '{key}' entry")]
    MissingState {
        /// The absent key
        key: &'static str,
    },

    /// The running action reported failure.
    #[error("action failed: {0}")]
    ActionFailed(String),

    /// Action parameters did not match the declared shape.
    #[error("bad action parameters: {0}")]
    BadParams(String),
}
