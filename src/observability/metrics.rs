//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ledger_bot_commands_total` (counter): dispatched commands by command, outcome
//! - `ledger_bot_ledger_requests_total` (counter): ledger calls by endpoint, status
//! - `ledger_bot_ledger_request_duration_seconds` (histogram): ledger latency by endpoint
//! - `ledger_bot_wallets` (gauge): records in the wallet store

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one dispatched command.
pub fn record_command(command: &str, outcome: &'static str) {
    metrics::counter!(
        "ledger_bot_commands_total",
        "command" => command.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one ledger round trip. `status` is the HTTP status, or 0 when the
/// service was unreachable.
pub fn record_ledger_request(endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "ledger_bot_ledger_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("ledger_bot_ledger_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record the current wallet store size.
pub fn record_wallet_count(count: usize) {
    metrics::gauge!("ledger_bot_wallets").set(count as f64);
}
