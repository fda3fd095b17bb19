//! Demo charm - a workload-orchestration charm implemented as a standalone
//! dispatch agent.
//!
//! The charm reacts to lifecycle events delivered by the orchestrator
//! (install, config-changed, start) and to operator actions (debug,
//! test-fortune). The main pieces:
//!
//! - A closed event model with an explicit handler-registration table
//! - A hook-tool backed model channel, swappable for an in-process one
//! - Persistent unit state behind a small store interface
//! - Markdown reference generation from the config and action schemas
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use demo_charm::charm::{CharmPaths, DemoCharm};
//! use demo_charm::events::Event;
//! use demo_charm::host::LocalHost;
//! use demo_charm::state::MemoryStateStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut charm = DemoCharm::new(
//!     LocalHost::new(),
//!     MemoryStateStore::default(),
//!     CharmPaths::with_base("/tmp/demo"),
//! );
//! charm.dispatch(Event::Install).await?;
//! # Ok(())
//! # }
//! ```

/// The charm: handler wiring, dispatch, hooks and actions.
pub mod charm;

/// Option snapshots, the typed config view, and delta detection.
pub mod config;

/// Reference documentation generation from schemas.
pub mod docs;

/// The event model and dispatch plumbing.
pub mod events;

/// The host surface: model channel, hook tools, command runner.
pub mod host;

/// Persistent unit state.
pub mod state;

/// Structured logging setup.
pub mod tracing_config;
