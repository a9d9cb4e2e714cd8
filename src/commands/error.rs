//! Command failure taxonomy.

use thiserror::Error;

use crate::ledger::LedgerError;
use crate::wallets::{StoreError, WalletRecord};

/// Every way a recognized command can fail. All variants end up as an
/// error reply; none escapes the dispatcher.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A required parameter is missing or unparsable.
    #[error("{0}")]
    Validation(String),

    /// The actor may not perform this action.
    #[error("{0}")]
    Authorization(String),

    /// The ledger call failed.
    #[error("{0}")]
    Api(#[from] LedgerError),

    /// The remote wallet was created but the store could not be written.
    /// `record` carries the new key so the actor can still receive it.
    #[error("Wallet `{}` was created but could not be saved: {source}", .record.username)]
    Persistence {
        record: WalletRecord,
        #[source]
        source: StoreError,
    },
}

impl CommandError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::Validation(_) => "validation_error",
            CommandError::Authorization(_) => "authorization_error",
            CommandError::Api(_) => "api_error",
            CommandError::Persistence { .. } => "persistence_error",
        }
    }
}

/// Result type for command handlers.
pub type CommandResult<T> = Result<T, CommandError>;
