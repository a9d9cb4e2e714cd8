//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require platform credentials
//! - Check URLs and bind addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BotConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::BotConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required credential is empty.
    MissingCredential(&'static str),
    /// A URL field does not parse.
    InvalidUrl { field: &'static str, value: String },
    /// A socket address field does not parse.
    InvalidAddress { field: &'static str, value: String },
    /// The free-text prefix cannot be a whitespace character.
    InvalidPrefix(char),
}

impl ValidationError {
    /// Missing credentials are what makes startup impossible rather than misconfigured.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, ValidationError::MissingCredential(_))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingCredential(name) => write!(f, "{} is required", name),
            ValidationError::InvalidUrl { field, value } => {
                write!(f, "{} is not a valid URL: '{}'", field, value)
            }
            ValidationError::InvalidAddress { field, value } => {
                write!(f, "{} is not a valid socket address: '{}'", field, value)
            }
            ValidationError::InvalidPrefix(c) => write!(f, "prefix {:?} must not be whitespace", c),
        }
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &BotConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.platform.token.trim().is_empty() {
        errors.push(ValidationError::MissingCredential("platform.token"));
    }
    if config.platform.application_id.trim().is_empty() {
        errors.push(ValidationError::MissingCredential("platform.application_id"));
    }
    if config.platform.prefix.is_whitespace() {
        errors.push(ValidationError::InvalidPrefix(config.platform.prefix));
    }

    check_url(&mut errors, "platform.api_base", &config.platform.api_base);
    check_url(&mut errors, "ledger.base_url", &config.ledger.base_url);

    check_addr(&mut errors, "ingress.bind_address", &config.ingress.bind_address);
    if config.observability.metrics_enabled {
        check_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if url::Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

fn check_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
