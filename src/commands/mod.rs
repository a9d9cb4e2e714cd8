//! Command normalization and dispatch.
//!
//! # Data Flow
//! ```text
//! input adapter
//!     → ParsedCommand (parsed.rs)
//!     → Dispatcher (dispatcher.rs): registry lookup, descriptor validation
//!     → handler (handlers.rs): guard → ledger → Outcome
//!     → reply formatter → ParsedCommand::reply
//! ```

pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod outcome;
pub mod parsed;

#[cfg(test)]
pub(crate) mod testing;

pub use descriptor::{CommandDescriptor, ParamDescriptor, ParamKind, COMMANDS};
pub use dispatcher::Dispatcher;
pub use error::{CommandError, CommandResult};
pub use handlers::{CommandHandler, HandlerContext};
pub use outcome::{BalanceSubject, Outcome};
pub use parsed::{ParamSource, ParsedCommand, ReplySink};
