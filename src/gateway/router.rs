//! Event router.
//!
//! # Responsibilities
//! - Offer each event to the input adapters in turn
//! - Run the resulting command through the dispatcher inside a span
//! - Collect whatever the reply sink delivered
//!
//! Each call is independent; concurrent events only meet at the wallet
//! store's per-owner lock.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::adapters::{FreeTextAdapter, InputAdapter, Outbound, PlatformEvent, StructuredAdapter};
use crate::commands::Dispatcher;

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// False when no adapter recognized the event as an invocation.
    pub handled: bool,
    pub deliveries: Vec<Outbound>,
}

impl EventOutcome {
    fn ignored() -> Self {
        Self {
            handled: false,
            deliveries: Vec::new(),
        }
    }
}

pub struct EventRouter {
    adapters: Vec<Box<dyn InputAdapter>>,
    dispatcher: Dispatcher,
}

impl EventRouter {
    /// Router with the structured and free-text adapters.
    pub fn new(dispatcher: Dispatcher, prefix: char) -> Self {
        Self::with_adapters(
            dispatcher,
            vec![Box::new(StructuredAdapter), Box::new(FreeTextAdapter::new(prefix))],
        )
    }

    pub fn with_adapters(dispatcher: Dispatcher, adapters: Vec<Box<dyn InputAdapter>>) -> Self {
        Self { adapters, dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handle one event end to end.
    pub async fn handle(&self, event: PlatformEvent) -> EventOutcome {
        let (outbox, mut deliveries) = mpsc::unbounded_channel();

        let adapted = self
            .adapters
            .iter()
            .find_map(|adapter| adapter.adapt(&event, &outbox).map(|cmd| (adapter.name(), cmd)));
        drop(outbox);

        let Some((adapter, cmd)) = adapted else {
            tracing::trace!(event_id = %event.id(), "Event is not a command");
            return EventOutcome::ignored();
        };

        let span = tracing::info_span!(
            "command",
            event_id = %event.id(),
            adapter = adapter,
            command = %cmd.name(),
            actor = %cmd.actor_id(),
        );
        self.dispatcher.dispatch(cmd).instrument(span).await;

        let mut out = Vec::new();
        while let Ok(delivery) = deliveries.try_recv() {
            out.push(delivery);
        }

        EventOutcome {
            handled: true,
            deliveries: out,
        }
    }
}
