//! Chat front end for a remote ledger service.
//!
//! Two input surfaces (structured interactions and prefixed free-text
//! messages) are normalized into one command form, checked against a local
//! wallet store, forwarded to the ledger's HTTP API, and answered with a
//! uniform reply.

pub mod adapters;
pub mod auth;
pub mod commands;
pub mod config;
pub mod gateway;
pub mod http;
pub mod ledger;
pub mod lifecycle;
pub mod observability;
pub mod platform;
pub mod reply;
pub mod wallets;

pub use config::schema::BotConfig;
pub use gateway::EventRouter;
pub use http::IngressServer;
pub use lifecycle::Shutdown;
