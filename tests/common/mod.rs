//! Shared utilities for integration tests.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use ledger_bot::config::BotConfig;

/// One request seen by the mock server.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// HTTP server on an ephemeral port that records every request and answers
/// from a per-path table (404 for anything unconfigured).
#[derive(Clone, Default)]
pub struct MockServer {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Arc<Mutex<HashMap<String, (u16, String)>>>,
}

#[allow(dead_code)]
impl MockServer {
    /// Start the server and return it with its base URL.
    pub async fn start() -> (Self, String) {
        let mock = MockServer::default();
        let app = Router::new().fallback(record).with_state(mock.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        (mock, format!("http://{}", addr))
    }

    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }
}

async fn record(
    State(mock): State<MockServer>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    mock.calls.lock().unwrap().push(RecordedCall {
        method,
        path: path.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let (status, body) = mock
        .responses
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .unwrap_or((404, r#"{"message":"Not found"}"#.to_string()));

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

/// URL of a loopback port nothing listens on.
#[allow(dead_code)]
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Fresh store path under the temp dir.
#[allow(dead_code)]
pub fn temp_store_path() -> PathBuf {
    std::env::temp_dir().join(format!("ledger-bot-it-{}.json", uuid::Uuid::new_v4()))
}

/// Config pointing at a mock ledger and a temp store.
#[allow(dead_code)]
pub fn test_config(ledger_url: &str, store_path: &Path) -> BotConfig {
    let mut config = BotConfig::default();
    config.platform.token = "test-token".into();
    config.platform.application_id = "123".into();
    config.platform.register_commands = false;
    config.ledger.base_url = ledger_url.to_string();
    config.store.path = store_path.to_string_lossy().into_owned();
    config
}
