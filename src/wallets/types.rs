//! Wallet record and persisted document types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier the chat platform assigns to a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(pub String);

impl PlatformId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlatformId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlatformId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger credentials owned by one platform identity.
///
/// The private key is opaque here. `Debug` redacts it so records can be
/// logged safely.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub username: String,
    pub private_key: String,
}

impl WalletRecord {
    pub fn new(username: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            private_key: private_key.into(),
        }
    }
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("username", &self.username)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// On-disk shape: `{ "wallets": { "<ownerId>": { "username", "privateKey" } } }`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub wallets: BTreeMap<PlatformId, WalletRecord>,
}
