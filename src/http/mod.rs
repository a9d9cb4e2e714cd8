//! HTTP ingress subsystem.
//!
//! # Data Flow
//! ```text
//! gateway bridge / ledger-cli
//!     → POST /events (PlatformEvent JSON)
//!     → EventRouter (adapters → dispatcher)
//!     → 200 { handled, deliveries } for the bridge to apply
//! ```

pub mod server;

pub use server::{AppState, IngressServer};
