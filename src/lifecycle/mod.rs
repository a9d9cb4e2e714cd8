//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Wallet store → Ledger client → Dispatcher → Event router
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight events → Exit
//!
//! Signals (signals.rs):
//!     Ctrl+C → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The wallet store is written on every mutation, so shutdown has nothing to flush

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{init_services, Services, StartupError};
