//! Wallet ownership policy.
//!
//! Pure reads over the [`WalletStore`]; no I/O, so handlers run them before
//! any ledger call and a denial never costs a network round trip.

use crate::wallets::{PlatformId, WalletRecord, WalletStore};

/// An actor may create a wallet only if it owns none yet.
pub fn can_create_wallet(store: &WalletStore, owner: &PlatformId) -> bool {
    store.get(owner).is_none()
}

/// An actor may spend as `payer` only from its own stored wallet.
///
/// Returns the actor's record so the caller can forward its key.
pub fn can_spend(store: &WalletStore, owner: &PlatformId, payer: &str) -> Option<WalletRecord> {
    store.get(owner).filter(|record| record.username == payer)
}
