//! Local credential store.
//!
//! # Data Flow
//! ```text
//! startup: wallets.json → store.rs::load (failures → empty store)
//! createwallet: lock_owner → get → ledger → set → persist
//! everything else: get (in-memory only)
//! ```

pub mod store;
pub mod types;

pub use store::{StoreError, WalletStore};
pub use types::{PlatformId, StoreDocument, WalletRecord};
