//! Startup orchestration.
//!
//! Builds the service graph from a validated config. Network-facing steps
//! (schema registration, listener bind) stay in the binary.

use std::sync::Arc;
use thiserror::Error;

use crate::commands::{Dispatcher, HandlerContext};
use crate::config::BotConfig;
use crate::gateway::EventRouter;
use crate::ledger::{LedgerClient, LedgerError};
use crate::wallets::WalletStore;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("ledger client: {0}")]
    Ledger(#[from] LedgerError),
}

/// Everything the ingress needs, wired together.
pub struct Services {
    pub store: WalletStore,
    pub events: Arc<EventRouter>,
}

/// Load the wallet store and build the dispatch pipeline.
pub fn init_services(config: &BotConfig) -> Result<Services, StartupError> {
    let store = WalletStore::load(&config.store.path);
    let ledger = LedgerClient::new(&config.ledger)?;

    tracing::info!(
        ledger_url = %ledger.base_url(),
        store_path = %config.store.path,
        wallets = store.len(),
        prefix = %config.platform.prefix,
        "Services initialized"
    );

    let dispatcher = Dispatcher::new(HandlerContext {
        store: store.clone(),
        ledger: Arc::new(ledger),
        prefix: config.platform.prefix,
    });
    let events = Arc::new(EventRouter::new(dispatcher, config.platform.prefix));

    Ok(Services { store, events })
}
