//! Chat platform REST integration.
//!
//! Only schema publication lives here; the gateway session that delivers
//! events is external and talks to the ingress.

pub mod registrar;

pub use registrar::{command_schema, CommandRegistrar, RegistrationError, SchemaCommand, SchemaOption};
