//! Test doubles shared by the command unit tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::commands::parsed::{ParamSource, ParsedCommand, ReplySink};
use crate::ledger::{LedgerApi, LedgerError, LedgerResult, Lookup, TransactionRequest};
use crate::reply::Reply;

/// In-memory ledger that records every call.
#[derive(Default)]
pub struct FakeLedger {
    calls: Mutex<Vec<String>>,
    transactions: Mutex<Vec<TransactionRequest>>,
    reject_with: Option<String>,
    delay: Option<Duration>,
}

impl FakeLedger {
    pub fn rejecting(body: &str) -> Self {
        Self {
            reject_with: Some(body.to_string()),
            ..Default::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn transactions(&self) -> Vec<TransactionRequest> {
        self.transactions.lock().unwrap().clone()
    }

    async fn record(&self, call: String) -> LedgerResult<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reject_with {
            Some(body) => Err(LedgerError::rejected(400, body)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LedgerApi for FakeLedger {
    async fn create_wallet(&self, username: &str) -> LedgerResult<String> {
        self.record(format!("create_wallet:{}", username)).await?;
        Ok(format!("PK-{}", username))
    }

    async fn get_public_key(&self, username: &str) -> LedgerResult<Lookup> {
        self.record(format!("get_public_key:{}", username)).await?;
        Ok(Lookup::Value(format!("PUB-{}", username)))
    }

    async fn create_transaction(&self, request: &TransactionRequest) -> LedgerResult<Option<String>> {
        self.record(format!("create_transaction:{}", request.payer)).await?;
        self.transactions.lock().unwrap().push(request.clone());
        Ok(Some("Transaction created".into()))
    }

    async fn mine_by_public_key(&self, public_key: &str) -> LedgerResult<Option<String>> {
        self.record(format!("mine_by_public_key:{}", public_key)).await?;
        Ok(None)
    }

    async fn mine_by_username(&self, username: &str) -> LedgerResult<Option<String>> {
        self.record(format!("mine_by_username:{}", username)).await?;
        Ok(None)
    }

    async fn check_balance_by_public_key(&self, public_key: &str) -> LedgerResult<Lookup> {
        self.record(format!("check_balance_by_public_key:{}", public_key)).await?;
        Ok(Lookup::Value("100".into()))
    }

    async fn check_balance_by_username(&self, username: &str) -> LedgerResult<Lookup> {
        self.record(format!("check_balance_by_username:{}", username)).await?;
        Ok(Lookup::Value("100".into()))
    }
}

struct MapParams(HashMap<String, Value>);

impl ParamSource for MapParams {
    fn string(&self, name: &str) -> Option<String> {
        self.0.get(name).and_then(|v| v.as_str()).map(str::to_string)
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(|v| v.as_f64())
    }
}

struct CaptureSink(Arc<Mutex<Vec<Reply>>>);

impl ReplySink for CaptureSink {
    fn deliver(&self, reply: &Reply) {
        self.0.lock().unwrap().push(reply.clone());
    }
}

/// Build a command with named parameters and a sink that captures replies.
pub fn command(name: &str, actor: &str, params: &[(&str, Value)]) -> (ParsedCommand, Arc<Mutex<Vec<Reply>>>) {
    let replies = Arc::new(Mutex::new(Vec::new()));
    let params = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    let cmd = ParsedCommand::new(
        name,
        actor.into(),
        Box::new(MapParams(params)),
        Box::new(CaptureSink(replies.clone())),
    );
    (cmd, replies)
}
