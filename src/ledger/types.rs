//! Ledger wire types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::config::schema::LedgerConfig;

/// Errors that can occur while talking to the ledger service.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The service answered with a non-success status. `body` is what it sent.
    #[error("{body}")]
    Rejected { status: u16, body: String },

    /// The service could not be reached.
    #[error("Ledger service unreachable: {0}")]
    Transport(String),

    /// The service answered with success but the body was not understood.
    #[error("Unexpected ledger response: {0}")]
    Decode(String),
}

impl LedgerError {
    /// Build a rejection from a raw response body, preferring a JSON
    /// `message` or `error` field when the service sent one.
    pub fn rejected(status: u16, raw: &str) -> Self {
        let body = serde_json::from_str::<ErrorBody>(raw)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    format!("Ledger service returned status {}", status)
                } else {
                    trimmed.to_string()
                }
            });
        LedgerError::Rejected { status, body }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// A lookup either finds a value or the service explains why not.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Value(String),
    Message(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

// Request bodies. Field names follow the service's JSON.

#[derive(Debug, Serialize)]
pub(crate) struct UsernameBody<'a> {
    pub username: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublicKeyBody<'a> {
    pub public_key: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct MinerBody<'a> {
    pub miner: &'a str,
}

/// Transaction submission as the ledger expects it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub amount: f64,
    pub payer: String,
    pub payee: String,
    pub private_key: String,
}

// Response bodies.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedWallet {
    pub private_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublicKeyReply {
    pub public_key: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalanceReply {
    pub balance: Option<serde_json::Value>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageReply {
    pub message: Option<String>,
}

/// Render a JSON balance without quoting strings.
pub(crate) fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
