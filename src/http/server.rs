//! Event ingress server.
//!
//! # Responsibilities
//! - Accept platform events as JSON and answer with rendered deliveries
//! - Expose the registered command schema and a health probe
//! - Wire up middleware (request ID, tracing)
//! - Shut down gracefully on the lifecycle signal
//!
//! Every request runs its own task, so a slow ledger call for one event
//! never holds up another.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::adapters::PlatformEvent;
use crate::gateway::{EventOutcome, EventRouter};
use crate::platform::command_schema;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<EventRouter>,
}

/// HTTP front door for platform events.
pub struct IngressServer {
    router: Router,
}

impl IngressServer {
    pub fn new(events: Arc<EventRouter>) -> Self {
        let router = Self::build_router(AppState { events });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/events", post(handle_event))
            .route("/commands", get(list_commands))
            .route("/health", get(health))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Event ingress listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Ingress draining");
            })
            .await?;

        tracing::info!("Event ingress stopped");
        Ok(())
    }
}

async fn handle_event(
    State(state): State<AppState>,
    Json(event): Json<PlatformEvent>,
) -> Json<EventOutcome> {
    Json(state.events.handle(event).await)
}

async fn list_commands() -> impl IntoResponse {
    Json(command_schema())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
