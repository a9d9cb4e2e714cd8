//! Remote ledger subsystem.
//!
//! # Data Flow
//! ```text
//! command handler
//!     → LedgerApi (trait seam, mocked in tests)
//!     → client.rs (one HTTP round trip per capability)
//!     → types.rs (wire bodies, LedgerError)
//! ```
//!
//! # Security Constraints
//! - Private keys travel only in the createTransaction body
//! - Never log private keys or request bodies

pub mod client;
pub mod types;

pub use client::{LedgerApi, LedgerClient};
pub use types::{LedgerError, LedgerResult, Lookup, TransactionRequest};
