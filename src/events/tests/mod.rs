//! Unit tests for the event model and the handler registry.

#![allow(clippy::unwrap_used)]

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::charm::CharmPaths;
use crate::events::{
    ActionName, Dispatch, Event, EventError, Handler, HandlerRegistry, HookContext, HookError,
};
use crate::host::LocalHost;
use crate::state::MemoryStateStore;

#[test]
fn event_names_round_trip() {
    let events = [
        Event::Install,
        Event::ConfigChanged,
        Event::Start,
        Event::Action(ActionName::Debug),
        Event::Action(ActionName::TestFortune),
    ];

    for event in events {
        assert_eq!(Event::from_str(event.name()).unwrap(), event);
        assert_eq!(event.to_string(), event.name());
    }
}

#[test]
fn action_names_resolve_as_events() {
    assert_eq!(
        Event::from_str("debug").unwrap(),
        Event::Action(ActionName::Debug)
    );
    assert_eq!(
        Event::from_str("test-fortune").unwrap(),
        Event::Action(ActionName::TestFortune)
    );
}

#[test]
fn unknown_event_names_are_rejected() {
    let err = Event::from_str("upgrade-charm").unwrap_err();

    assert!(matches!(err, EventError::UnknownEvent { name } if name == "upgrade-charm"));
}

#[test]
fn unknown_action_names_are_rejected() {
    let err = ActionName::from_str("fortune").unwrap_err();

    assert!(matches!(err, EventError::UnknownAction { name } if name == "fortune"));
}

struct Recording {
    event: Event,
    outcome: Dispatch,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for Recording {
    fn event(&self) -> Event {
        self.event
    }

    async fn handle(&self, _ctx: &mut HookContext<'_>) -> Result<Dispatch, HookError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome)
    }
}

#[tokio::test]
async fn dispatch_routes_to_the_registered_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = HandlerRegistry::new();
    registry.register(Box::new(Recording {
        event: Event::Start,
        outcome: Dispatch::Completed,
        calls: Arc::clone(&calls),
    }));

    let host = LocalHost::new();
    let mut store = MemoryStateStore::default();
    let paths = CharmPaths::with_base(".");
    let mut ctx = HookContext {
        model: &host,
        state: &mut store,
        paths: &paths,
    };

    let outcome = registry.dispatch(Event::Start, &mut ctx).await.unwrap();

    assert_eq!(outcome, Dispatch::Completed);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dispatch_without_a_handler_completes() {
    let registry = HandlerRegistry::new();

    let host = LocalHost::new();
    let mut store = MemoryStateStore::default();
    let paths = CharmPaths::with_base(".");
    let mut ctx = HookContext {
        model: &host,
        state: &mut store,
        paths: &paths,
    };

    let outcome = registry.dispatch(Event::Install, &mut ctx).await.unwrap();

    assert_eq!(outcome, Dispatch::Completed);
}

#[tokio::test]
async fn registering_twice_replaces_the_handler() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let mut registry = HandlerRegistry::new();
    registry.register(Box::new(Recording {
        event: Event::Install,
        outcome: Dispatch::Completed,
        calls: Arc::clone(&first),
    }));
    registry.register(Box::new(Recording {
        event: Event::Install,
        outcome: Dispatch::Deferred,
        calls: Arc::clone(&second),
    }));

    let host = LocalHost::new();
    let mut store = MemoryStateStore::default();
    let paths = CharmPaths::with_base(".");
    let mut ctx = HookContext {
        model: &host,
        state: &mut store,
        paths: &paths,
    };

    let outcome = registry.dispatch(Event::Install, &mut ctx).await.unwrap();

    assert_eq!(outcome, Dispatch::Deferred);
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn registered_events_are_sorted_by_name() {
    let mut registry = HandlerRegistry::new();
    for event in [
        Event::Start,
        Event::Install,
        Event::Action(ActionName::TestFortune),
        Event::ConfigChanged,
        Event::Action(ActionName::Debug),
    ] {
        registry.register(Box::new(Recording {
            event,
            outcome: Dispatch::Completed,
            calls: Arc::new(AtomicUsize::new(0)),
        }));
    }

    let names: Vec<&str> = registry
        .registered_events()
        .iter()
        .map(Event::name)
        .collect();

    assert_eq!(
        names,
        vec!["config-changed", "debug", "install", "start", "test-fortune"]
    );
}
