use std::collections::HashMap;

use tracing::debug;

use super::{Dispatch, Event, Handler, HookContext, HookError};

/// Table of event handlers keyed by the event they react to.
///
/// Registration is explicit: the charm lists every event it cares about at
/// construction time, and the mapping is inspectable afterwards. An event
/// with no registered handler is logged and dropped rather than treated as
/// an error, mirroring how unobserved lifecycle events fall through.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<Event, Box<dyn Handler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for the event it names.
    ///
    /// A handler already registered for the same event is replaced, which
    /// is how tests swap in instrumented handlers.
    pub fn register(&mut self, handler: Box<dyn Handler>) {
        self.handlers.insert(handler.event(), handler);
    }

    /// Dispatches `event` to its registered handler.
    ///
    /// # Errors
    /// Propagates whatever [`HookError`] the handler raises.
    pub async fn dispatch(
        &self,
        event: Event,
        ctx: &mut HookContext<'_>,
    ) -> Result<Dispatch, HookError> {
        match self.handlers.get(&event) {
            Some(handler) => handler.handle(ctx).await,
            None => {
                debug!(%event, "no handler registered, dropping event");
                Ok(Dispatch::Completed)
            }
        }
    }

    /// Events with a registered handler, sorted by name.
    pub fn registered_events(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self.handlers.keys().copied().collect();
        events.sort_by_key(|event| event.name());
        events
    }
}
