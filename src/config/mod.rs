//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (token, application id, ledger URL, prefix)
//!     → validation.rs (semantic checks)
//!     → BotConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Missing platform credentials are fatal at startup
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    BotConfig, IngressConfig, LedgerConfig, ObservabilityConfig, PlatformConfig, StoreConfig,
};
