//! Input adapters.
//!
//! # Data Flow
//! ```text
//! PlatformEvent
//!     → structured.rs (interaction, named options)  ┐
//!     → free_text.rs  (prefixed message, positions) ┴→ ParsedCommand + reply sink
//! ```
//!
//! Adapters decide whether an event is an invocation at all; anything else
//! produces no command and no reply.

pub mod event;
pub mod free_text;
pub mod structured;

use tokio::sync::mpsc;

use crate::commands::ParsedCommand;

pub use event::{Author, Embed, Interaction, InteractionData, InteractionKind, InteractionOption, Message, Outbound, PlatformEvent};
pub use free_text::FreeTextAdapter;
pub use structured::StructuredAdapter;

/// Channel reply sinks push rendered deliveries into.
pub type Outbox = mpsc::UnboundedSender<Outbound>;

/// Turns one platform event into a canonical command, or declines it.
pub trait InputAdapter: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Produce a command whose replies go to `outbox`, or `None` when the
    /// event is not an invocation for this adapter.
    fn adapt(&self, event: &PlatformEvent, outbox: &Outbox) -> Option<ParsedCommand>;
}
