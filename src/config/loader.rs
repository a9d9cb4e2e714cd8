//! Configuration loading from disk and environment.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::schema::BotConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV_VAR: &str = "LEDGER_BOT_CONFIG";
/// Config file used when `LEDGER_BOT_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "ledger-bot.toml";

pub const TOKEN_ENV_VAR: &str = "LEDGER_BOT_TOKEN";
pub const APPLICATION_ID_ENV_VAR: &str = "LEDGER_BOT_APPLICATION_ID";
pub const LEDGER_URL_ENV_VAR: &str = "LEDGER_BOT_LEDGER_URL";
pub const PREFIX_ENV_VAR: &str = "LEDGER_BOT_PREFIX";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration the way the service binary does: file named by
/// `LEDGER_BOT_CONFIG` (if present), then process environment, then validation.
pub fn load_from_env() -> Result<BotConfig, ConfigError> {
    let path = std::env::var(CONFIG_PATH_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(Path::new(&path), |key| std::env::var(key).ok())
}

/// Load and validate configuration.
///
/// A missing file is not an error: every field has a default and the
/// credentials usually arrive through the environment. `env` resolves
/// override variables.
pub fn load_config<F>(path: &Path, env: F) -> Result<BotConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            BotConfig::default()
        }
        Err(e) => return Err(ConfigError::Io(e)),
    };

    apply_env_overrides(&mut config, env);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables on a parsed config.
pub fn apply_env_overrides<F>(config: &mut BotConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = env(TOKEN_ENV_VAR) {
        config.platform.token = token;
    }
    if let Some(id) = env(APPLICATION_ID_ENV_VAR) {
        config.platform.application_id = id;
    }
    if let Some(url) = env(LEDGER_URL_ENV_VAR) {
        config.ledger.base_url = url;
    }
    if let Some(prefix) = env(PREFIX_ENV_VAR).and_then(|p| p.chars().next()) {
        config.platform.prefix = prefix;
    }
}
