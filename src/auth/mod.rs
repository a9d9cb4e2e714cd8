//! Authorization checks for wallet-mutating and spending commands.

pub mod guard;

pub use guard::{can_create_wallet, can_spend};
