//! Ledger chat bot service.
//!
//! # Architecture Overview
//!
//! ```text
//!   platform event (JSON)
//!   ───────────────────────▶ ┌──────────┐   ┌────────────┐   ┌────────────┐
//!                            │ ingress  │──▶│  adapters  │──▶│ dispatcher │
//!                            └──────────┘   │ structured │   └─────┬──────┘
//!                                           │ free-text  │         │
//!                                           └────────────┘         ▼
//!                                                           ┌────────────┐   ┌─────────┐
//!                                                           │  handler   │──▶│  guard  │◀── wallet store
//!                                                           └─────┬──────┘   └─────────┘
//!                                                                 ▼
//!   deliveries (JSON)        ┌──────────┐   ┌────────────┐  ┌────────────┐
//!   ◀─────────────────────── │  sink    │◀──│ formatter  │◀─│  ledger    │◀──▶ ledger HTTP API
//!                            └──────────┘   └────────────┘  └────────────┘
//! ```

use std::net::SocketAddr;
use tokio::net::TcpListener;

use ledger_bot::config;
use ledger_bot::http::IngressServer;
use ledger_bot::lifecycle::{self, signals, Shutdown};
use ledger_bot::observability::{logging, metrics};
use ledger_bot::platform::CommandRegistrar;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Missing credentials stop the process here.
    let config = config::load_from_env()?;

    logging::init_logging(&config.observability);
    tracing::info!("ledger-bot v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let services = lifecycle::init_services(&config)?;

    if config.platform.register_commands {
        let registrar = CommandRegistrar::new(&config.platform);
        if let Err(e) = registrar.register().await {
            tracing::error!(error = %e, "Command schema registration failed, continuing");
        }
    }

    let listener = TcpListener::bind(&config.ingress.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = IngressServer::new(services.events.clone());
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    signals::shutdown_on_ctrl_c(&shutdown).await;
    server_task.await??;

    tracing::info!(wallets = services.store.len(), "Shutdown complete");
    Ok(())
}
