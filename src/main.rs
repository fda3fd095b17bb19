//! Dispatch entry point for the demo charm.
//!
//! The orchestrator invokes this binary once per event. The event to handle
//! comes from the command line or, when omitted, from the dispatch
//! environment the orchestrator sets up.

use std::error::Error;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use demo_charm::charm::{CharmPaths, DemoCharm};
use demo_charm::config::CharmConfig;
use demo_charm::events::{Event, EventError};
use demo_charm::host::{ActionParams, LocalHost, ToolHost};
use demo_charm::state::{FileStateStore, MemoryStateStore};
use demo_charm::tracing_config;

#[derive(Parser)]
#[command(name = "demo-charm")]
#[command(about = "Dispatch agent for the demo charm")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one lifecycle event or action
    Dispatch {
        /// Event name; resolved from the dispatch environment when omitted
        event: Option<String>,

        /// Run against an in-process host instead of the hook tools
        #[arg(long)]
        dry_run: bool,

        /// Override the charm's base directory
        #[arg(long)]
        base_dir: Option<String>,
    },
    /// List the events the charm reacts to
    Events,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dispatch {
            event,
            dry_run,
            base_dir,
        } => dispatch(event, dry_run, base_dir).await,
        Commands::Events => {
            list_events();
            Ok(())
        }
    }
}

async fn dispatch(
    event: Option<String>,
    dry_run: bool,
    base_dir: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let paths = match base_dir {
        Some(base) => CharmPaths::with_base(base),
        None => CharmPaths::from_env(),
    };

    if dry_run {
        tracing_config::init()?;
    } else {
        tracing_config::init_with_file(&paths)?;
    }

    let event = match resolve_event(event.as_deref()) {
        Ok(Some(event)) => event,
        Ok(None) => {
            info!("no event named and none in the environment, nothing to dispatch");
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    if dry_run {
        run_dry(event, paths).await
    } else {
        run_live(event, paths).await
    }
}

fn resolve_event(name: Option<&str>) -> Result<Option<Event>, EventError> {
    match name {
        Some(name) => Event::from_str(name).map(Some),
        None => Event::from_env(),
    }
}

/// Runs the event against the real orchestrator through the hook tools,
/// with state persisted under the charm's data directory.
async fn run_live(event: Event, paths: CharmPaths) -> Result<(), Box<dyn Error>> {
    let store = FileStateStore::open(paths.state_file())?;
    let mut charm = DemoCharm::new(ToolHost::new(), store, paths);

    match charm.dispatch(event).await {
        Ok(outcome) => {
            info!(%event, ?outcome, "dispatch finished");
            Ok(())
        }
        Err(err) => {
            error!(%event, error = %err, "dispatch failed");
            eprintln!("dispatch of '{event}' failed: {err}");
            process::exit(1);
        }
    }
}

/// Runs the event against an in-process host with the declared config
/// defaults, then prints what the handler would have reported.
async fn run_dry(event: Event, paths: CharmPaths) -> Result<(), Box<dyn Error>> {
    let mut host = LocalHost::new().with_config(CharmConfig::default_snapshot());
    if matches!(event, Event::Action(_)) {
        host = host.with_action_params(ActionParams::new());
    }
    let mut charm = DemoCharm::new(host, MemoryStateStore::default(), paths);

    let outcome = charm.dispatch(event).await;

    for status in charm.model().statuses() {
        println!("status: {status}");
    }
    for results in charm.model().results() {
        for (key, value) in &results {
            println!("result: {key}={value}");
        }
    }
    for failure in charm.model().failures() {
        println!("action failure: {failure}");
    }

    match outcome {
        Ok(outcome) => {
            info!(%event, ?outcome, "dry run finished");
            Ok(())
        }
        Err(err) => {
            eprintln!("dispatch of '{event}' failed: {err}");
            process::exit(1);
        }
    }
}

fn list_events() {
    let charm = DemoCharm::new(
        LocalHost::new(),
        MemoryStateStore::default(),
        CharmPaths::from_env(),
    );

    println!("Events the charm reacts to:");
    for event in charm.registered_events() {
        println!("  - {event}");
    }
}
