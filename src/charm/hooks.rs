use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;
use tracing::{debug, error, info};

use super::pending_changes;
use crate::config::CharmConfig;
use crate::events::{Dispatch, Event, Handler, HookContext, HookError};
use crate::host::{Status, run_command};
use crate::state::StoredState;

/// Time limit for the diagnostic listing run during install.
const DIAGNOSTIC_TIMEOUT: Duration = Duration::from_secs(30);

/// Content of the marker file written by start.
const MARKER_CONTENT: &str = "this is a simple test";

fn dated_folder_name() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn marker_file_name() -> String {
    format!("{}.txt", Local::now().format("%Y-%m-%d-%H_%M_%S"))
}

/// Handles `install`: prepares a dated working directory for the workload.
///
/// A diagnostic listing of the host's home directories runs first; when it
/// cannot be spawned at all, the event is deferred and install is retried
/// on the next dispatch. A listing that runs but exits non-zero is only
/// logged.
#[derive(Debug)]
pub struct InstallHook {
    listing: Vec<String>,
}

impl Default for InstallHook {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallHook {
    /// Creates the handler with the stock `ls /home` diagnostic listing.
    pub fn new() -> Self {
        Self {
            listing: vec!["ls".to_string(), "/home".to_string()],
        }
    }

    /// Overrides the diagnostic listing command.
    #[must_use]
    pub fn with_listing_command(mut self, listing: Vec<String>) -> Self {
        self.listing = listing;
        self
    }
}

#[async_trait]
impl Handler for InstallHook {
    fn event(&self) -> Event {
        Event::Install
    }

    async fn handle(&self, ctx: &mut HookContext<'_>) -> Result<Dispatch, HookError> {
        info!("installing the demo workload");

        match run_command(&self.listing, DIAGNOSTIC_TIMEOUT).await {
            Ok(listing) => debug!(stdout = %listing.stdout, "home listing"),
            Err(err) => {
                error!(error = %err, "failed to install the demo workload, deferring");
                return Ok(Dispatch::Deferred);
            }
        }

        let folder = ctx.paths.base_dir().join(dated_folder_name());
        if folder.exists() {
            info!(folder = %folder.display(), "dated directory already exists");
        } else {
            fs::create_dir(&folder).map_err(|err| HookError::Io {
                path: folder.clone(),
                details: err.to_string(),
            })?;
            info!(folder = %folder.display(), "created dated directory");
        }

        let mut state = StoredState::load(ctx.state);
        state.things.insert(
            "folder".to_string(),
            Value::String(folder.to_string_lossy().into_owned()),
        );
        state.initialized = true;
        state.write(ctx.state)?;
        info!("demo workload initialized");

        ctx.model
            .set_status(Status::Maintenance("Installation done".to_string()))
            .await?;

        Ok(Dispatch::Completed)
    }
}

/// Handles `config-changed`: re-reads the option snapshot and applies it.
#[derive(Debug, Default)]
pub struct ConfigChangedHook;

impl ConfigChangedHook {
    /// Creates the handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for ConfigChangedHook {
    fn event(&self) -> Event {
        Event::ConfigChanged
    }

    async fn handle(&self, ctx: &mut HookContext<'_>) -> Result<Dispatch, HookError> {
        info!("updating charm config");

        let snapshot = ctx.model.config().await?;
        let mut state = StoredState::load(ctx.state);

        // The recorded baseline is never written back, so every option
        // keeps reporting as pending. See the changelog.
        let delta = pending_changes(&snapshot, &state);
        debug!(pending = delta.len(), "options pending application");

        let config = CharmConfig::from_snapshot(&snapshot)?;
        state
            .things
            .insert("alice".to_string(), Value::String(config.alice));
        state
            .things
            .insert("bobob".to_string(), Value::String(config.bobob));
        state.write(ctx.state)?;

        ctx.model.set_status(Status::Active(config.message)).await?;
        debug!("configuration changes applied");

        Ok(Dispatch::Completed)
    }
}

/// Handles `start`: drops a marker file into the install-time directory.
///
/// Does nothing until install has completed, and quietly skips the marker
/// when the directory has since disappeared.
#[derive(Debug, Default)]
pub struct StartHook;

impl StartHook {
    /// Creates the handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for StartHook {
    fn event(&self) -> Event {
        Event::Start
    }

    async fn handle(&self, ctx: &mut HookContext<'_>) -> Result<Dispatch, HookError> {
        info!("starting the demo workload");

        let state = StoredState::load(ctx.state);
        if !state.initialized {
            info!("not initialized yet, not starting");
            return Ok(Dispatch::Completed);
        }

        let folder = state
            .things
            .get("folder")
            .and_then(Value::as_str)
            .ok_or(HookError::MissingState { key: "folder" })?;
        let folder = Path::new(folder);

        if !folder.exists() {
            info!(folder = %folder.display(), "working directory is gone, skipping marker");
            return Ok(Dispatch::Completed);
        }

        let marker = folder.join(marker_file_name());
        fs::write(&marker, MARKER_CONTENT).map_err(|err| HookError::Io {
            path: marker,
            details: err.to_string(),
        })?;

        ctx.model
            .set_status(Status::Active("Start".to_string()))
            .await?;

        Ok(Dispatch::Completed)
    }
}
