//! Wallet store with whole-document persistence.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::observability::metrics;
use crate::wallets::types::{PlatformId, StoreDocument, WalletRecord};

/// Errors raised while writing the store to disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write wallet store: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize wallet store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Mapping from platform identity to ledger credentials.
///
/// Cheap to clone; clones share state. Readers always see the in-memory
/// map: the backing file is read once by [`WalletStore::load`] and only
/// written afterwards.
#[derive(Clone, Default)]
pub struct WalletStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    wallets: DashMap<PlatformId, WalletRecord>,
    /// One async mutex per owner, held across check-create-set-persist.
    owner_locks: DashMap<PlatformId, Arc<AsyncMutex<()>>>,
    /// Serializes whole-file writes.
    write_lock: Mutex<()>,
    persistence_path: Option<PathBuf>,
}

impl WalletStore {
    /// Create an empty store. Without a path, `persist` is a no-op.
    pub fn new(persistence_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                persistence_path,
                ..Default::default()
            }),
        }
    }

    /// Load from file. Never fails: a missing, unreadable or malformed file
    /// yields an empty store bound to the same path.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let store = Self::new(Some(path.to_path_buf()));

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No wallet store file, starting empty");
                return store;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable wallet store, starting empty");
                return store;
            }
        };

        let document: StoreDocument = match serde_json::from_str(&content) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Malformed wallet store, starting empty");
                return store;
            }
        };

        for (owner, record) in document.wallets {
            if record.username.is_empty() || record.private_key.is_empty() {
                tracing::warn!(owner = %owner, "Skipping incomplete wallet record");
                continue;
            }
            store.inner.wallets.insert(owner, record);
        }

        metrics::record_wallet_count(store.len());
        tracing::info!("Loaded {} wallets from store file", store.len());
        store
    }

    /// Wallet owned by `owner`, if any.
    pub fn get(&self, owner: &PlatformId) -> Option<WalletRecord> {
        self.inner.wallets.get(owner).map(|r| r.value().clone())
    }

    /// Insert or overwrite the wallet for `owner`.
    ///
    /// Uniqueness is the caller's job: check [`get`](Self::get) under
    /// [`lock_owner`](Self::lock_owner) first.
    pub fn set(&self, owner: PlatformId, record: WalletRecord) {
        self.inner.wallets.insert(owner, record);
        metrics::record_wallet_count(self.len());
    }

    /// Write the full mapping to the backing file, replacing it.
    pub fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.inner.persistence_path else {
            return Ok(());
        };

        let _guard = self.inner.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let document = StoreDocument {
            wallets: self
                .inner
                .wallets
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect::<BTreeMap<_, _>>(),
        };
        let bytes = serde_json::to_vec_pretty(&document)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;

        tracing::debug!(path = %path.display(), count = document.wallets.len(), "Persisted wallet store");
        Ok(())
    }

    /// Acquire the mutation lock for one owner. Different owners never contend.
    pub async fn lock_owner(&self, owner: &PlatformId) -> OwnedMutexGuard<()> {
        let lock = self
            .inner
            .owner_locks
            .entry(owner.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .value()
            .clone();
        lock.lock_owned().await
    }

    /// Number of stored wallets.
    pub fn len(&self) -> usize {
        self.inner.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.wallets.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.inner.persistence_path.as_deref()
    }
}
