//! The demo charm itself: handler wiring, dispatch, and the hook and
//! action implementations.

mod actions;
mod hooks;
mod paths;


pub use actions::{DebugAction, FortuneParams, TestFortuneAction};
pub use hooks::{ConfigChangedHook, InstallHook, StartHook};
pub use paths::CharmPaths;

use std::str::FromStr;

use tracing::{info, warn};

use crate::config::{ConfigSnapshot, changed_options};
use crate::events::{Dispatch, Event, Handler, HandlerRegistry, HookContext, HookError};
use crate::host::Model;
use crate::state::{StateStore, StoredState};

/// Options from `snapshot` that are new or changed relative to the baseline
/// recorded in `state`.
pub fn pending_changes(snapshot: &ConfigSnapshot, state: &StoredState) -> ConfigSnapshot {
    changed_options(snapshot, &state.config)
}

/// The demo charm: a fixed table of event handlers plus the dispatch
/// plumbing that drives them.
///
/// The model channel and the state store are injected so the same charm
/// runs against the real orchestrator, a dry-run stand-in, or a test
/// fixture without changing any handler code.
pub struct DemoCharm<M, S> {
    model: M,
    state: S,
    paths: CharmPaths,
    registry: HandlerRegistry,
}

impl<M: Model, S: StateStore> DemoCharm<M, S> {
    /// Wires up the stock handler table.
    pub fn new(model: M, state: S, paths: CharmPaths) -> Self {
        let mut registry = HandlerRegistry::new();
        registry.register(Box::new(InstallHook::new()));
        registry.register(Box::new(ConfigChangedHook::new()));
        registry.register(Box::new(StartHook::new()));
        registry.register(Box::new(DebugAction::new()));
        registry.register(Box::new(TestFortuneAction::new()));

        Self {
            model,
            state,
            paths,
            registry,
        }
    }

    /// Replaces the handler for whatever event `handler` names.
    pub fn override_handler(&mut self, handler: Box<dyn Handler>) {
        self.registry.register(handler);
    }

    /// Events the charm reacts to, sorted by name.
    pub fn registered_events(&self) -> Vec<Event> {
        self.registry.registered_events()
    }

    /// The injected model channel.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The injected state store.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The charm's filesystem layout.
    pub fn paths(&self) -> &CharmPaths {
        &self.paths
    }

    /// Dispatches `event`, replaying any deferred events first.
    ///
    /// A handler returning [`Dispatch::Deferred`] gets its event queued and
    /// replayed, in queue order, at the start of the next dispatch. State is
    /// persisted once, after everything succeeded; a failed dispatch leaves
    /// the durable state exactly as the previous one left it.
    ///
    /// # Errors
    /// Propagates the first [`HookError`] any handler raises.
    pub async fn dispatch(&mut self, event: Event) -> Result<Dispatch, HookError> {
        self.replay_deferred().await?;

        let mut ctx = HookContext {
            model: &self.model,
            state: &mut self.state,
            paths: &self.paths,
        };
        let outcome = self.registry.dispatch(event, &mut ctx).await?;

        if outcome == Dispatch::Deferred {
            Self::push_deferred(&mut self.state, event)?;
        }

        self.state.persist()?;
        Ok(outcome)
    }

    async fn replay_deferred(&mut self) -> Result<(), HookError> {
        let mut state = StoredState::load(&self.state);
        if state.deferred.is_empty() {
            return Ok(());
        }

        let queued = std::mem::take(&mut state.deferred);
        state.write(&mut self.state)?;

        for name in queued {
            let Ok(event) = Event::from_str(&name) else {
                warn!(event = %name, "dropping unparseable deferred event");
                continue;
            };
            info!(%event, "replaying deferred event");

            let mut ctx = HookContext {
                model: &self.model,
                state: &mut self.state,
                paths: &self.paths,
            };
            let outcome = self.registry.dispatch(event, &mut ctx).await?;
            if outcome == Dispatch::Deferred {
                Self::push_deferred(&mut self.state, event)?;
            }
        }

        Ok(())
    }

    fn push_deferred(store: &mut S, event: Event) -> Result<(), HookError> {
        let mut state = StoredState::load(store);
        state.deferred.push(event.name().to_string());
        state.write(store)?;
        Ok(())
    }
}
