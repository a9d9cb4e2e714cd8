//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bot.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default ledger service the bot was built against.
pub const DEFAULT_LEDGER_URL: &str = "https://bvclockchain-findof1s-projects.vercel.app";

/// Root configuration for the bot.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BotConfig {
    /// Chat platform credentials and command surface.
    pub platform: PlatformConfig,

    /// Remote ledger service.
    pub ledger: LedgerConfig,

    /// Wallet store persistence.
    pub store: StoreConfig,

    /// Event ingress listener.
    pub ingress: IngressConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chat platform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Bot authentication token. Required.
    pub token: String,

    /// Application identifier the command schema is registered under. Required.
    pub application_id: String,

    /// Base URL of the platform REST API.
    pub api_base: String,

    /// Prefix character for free-text commands.
    pub prefix: char,

    /// Publish the structured-command schema at startup.
    pub register_commands: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            application_id: String::new(),
            api_base: "https://discord.com/api/v9".to_string(),
            prefix: '!',
            register_commands: true,
        }
    }
}

/// Remote ledger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Base URL every ledger endpoint is resolved against.
    pub base_url: String,

    /// Optional per-request timeout. Unset means the transport default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LEDGER_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Wallet store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON document holding all wallets.
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "wallets.json".to_string(),
        }
    }
}

/// Event ingress configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IngressConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for IngressConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
