//! Ledger HTTP client.
//!
//! # Responsibilities
//! - Build one request per ledger capability against the configured base URL
//! - Normalize failures into [`LedgerError`] (rejection vs. unreachable)
//! - Record per-endpoint metrics
//!
//! No retries and no caching: every call is a single attempt and failures
//! are surfaced to the caller.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::ledger::types::{
    display_value, BalanceReply, CreatedWallet, LedgerConfig, LedgerError, LedgerResult, Lookup,
    MessageReply, MinerBody, PublicKeyBody, PublicKeyReply, TransactionRequest, UsernameBody,
};
use crate::observability::metrics;

/// The ledger capabilities command handlers depend on.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Create a wallet and return its private key.
    async fn create_wallet(&self, username: &str) -> LedgerResult<String>;

    async fn get_public_key(&self, username: &str) -> LedgerResult<Lookup>;

    /// Submit a signed transfer. Returns the service's message, if any.
    async fn create_transaction(&self, request: &TransactionRequest) -> LedgerResult<Option<String>>;

    async fn mine_by_public_key(&self, public_key: &str) -> LedgerResult<Option<String>>;

    async fn mine_by_username(&self, username: &str) -> LedgerResult<Option<String>>;

    async fn check_balance_by_public_key(&self, public_key: &str) -> LedgerResult<Lookup>;

    async fn check_balance_by_username(&self, username: &str) -> LedgerResult<Lookup>;
}

/// reqwest-backed [`LedgerApi`].
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    base_url: String,
}

impl LedgerClient {
    /// Create a client for the configured service.
    pub fn new(config: &LedgerConfig) -> LedgerResult<Self> {
        let parsed: url::Url = config.base_url.parse().map_err(|e| {
            LedgerError::Transport(format!("Invalid ledger URL '{}': {}", config.base_url, e))
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| LedgerError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<B, R>(&self, endpoint: &'static str, method: Method, body: &B) -> LedgerResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let start = Instant::now();
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!(endpoint = endpoint, method = %method, "Calling ledger");

        // The service reads JSON bodies on GET routes too.
        let response = match self.http.request(method, &url).json(body).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(endpoint = endpoint, error = %e, "Ledger unreachable");
                metrics::record_ledger_request(endpoint, 0, start);
                return Err(LedgerError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        metrics::record_ledger_request(endpoint, status.as_u16(), start);

        let text = response
            .text()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::info!(endpoint = endpoint, status = status.as_u16(), "Ledger rejected request");
            return Err(LedgerError::rejected(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| LedgerError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LedgerApi for LedgerClient {
    async fn create_wallet(&self, username: &str) -> LedgerResult<String> {
        let reply: CreatedWallet = self
            .call("/addWallet", Method::POST, &UsernameBody { username })
            .await?;

        match reply.private_key {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(LedgerError::Decode("response carried no private key".into())),
        }
    }

    async fn get_public_key(&self, username: &str) -> LedgerResult<Lookup> {
        let reply: PublicKeyReply = self
            .call("/getPublicKeyFromUsername", Method::GET, &UsernameBody { username })
            .await?;

        match (reply.public_key, reply.message) {
            (Some(key), _) => Ok(Lookup::Value(key)),
            (None, Some(message)) => Ok(Lookup::Message(message)),
            (None, None) => Err(LedgerError::Decode("response carried no public key".into())),
        }
    }

    async fn create_transaction(&self, request: &TransactionRequest) -> LedgerResult<Option<String>> {
        let reply: MessageReply = self.call("/createTransaction", Method::POST, request).await?;
        Ok(reply.message)
    }

    async fn mine_by_public_key(&self, public_key: &str) -> LedgerResult<Option<String>> {
        let reply: MessageReply = self
            .call("/mine/publicKey", Method::POST, &MinerBody { miner: public_key })
            .await?;
        Ok(reply.message)
    }

    async fn mine_by_username(&self, username: &str) -> LedgerResult<Option<String>> {
        let reply: MessageReply = self
            .call("/mine/username", Method::POST, &MinerBody { miner: username })
            .await?;
        Ok(reply.message)
    }

    async fn check_balance_by_public_key(&self, public_key: &str) -> LedgerResult<Lookup> {
        let reply: BalanceReply = self
            .call("/checkBalance/publicKey", Method::GET, &PublicKeyBody { public_key })
            .await?;
        balance_lookup(reply)
    }

    async fn check_balance_by_username(&self, username: &str) -> LedgerResult<Lookup> {
        let reply: BalanceReply = self
            .call("/checkBalance/username", Method::GET, &UsernameBody { username })
            .await?;
        balance_lookup(reply)
    }
}

fn balance_lookup(reply: BalanceReply) -> LedgerResult<Lookup> {
    match (reply.balance, reply.message) {
        (Some(balance), _) if !balance.is_null() => Ok(Lookup::Value(display_value(&balance))),
        (_, Some(message)) => Ok(Lookup::Message(message)),
        _ => Err(LedgerError::Decode("response carried no balance".into())),
    }
}
