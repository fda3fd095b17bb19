use std::env;
use std::io::Error;
use std::path::{Path, PathBuf};

/// Filesystem layout of a deployed charm unit.
///
/// Everything the charm writes lives under one base directory so that dry
/// runs and tests can relocate the whole layout with a single flag.
#[derive(Debug, Clone)]
pub struct CharmPaths {
    base: PathBuf,
}

impl CharmPaths {
    /// Resolves the layout from the dispatch environment.
    ///
    /// `CHARM_BASE_DIR` takes precedence, then the orchestrator-provided
    /// `JUJU_CHARM_DIR`, then the current directory.
    pub fn from_env() -> Self {
        let base = env::var("CHARM_BASE_DIR")
            .or_else(|_| env::var("JUJU_CHARM_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self { base }
    }

    /// Layout rooted at `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Root of the charm's working area.
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Directory for unit-local data, under the base directory.
    pub fn data_dir(&self) -> PathBuf {
        self.base.join(".demo-charm")
    }

    /// The persistent state document.
    pub fn state_file(&self) -> PathBuf {
        self.data_dir().join("stored-state.json")
    }

    /// The log directory, created if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created.
    pub fn log_dir(&self) -> Result<PathBuf, Error> {
        let log_dir = self.data_dir().join("logs");

        if !log_dir.exists() {
            std::fs::create_dir_all(&log_dir)?;
        }

        Ok(log_dir)
    }
}
