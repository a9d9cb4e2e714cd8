//! Structured-command schema registration.
//!
//! # Responsibilities
//! - Render the command table in the platform's schema format
//! - Publish it once at startup (bulk overwrite of global commands)
//!
//! # Design Decisions
//! - A failed registration is logged by the caller, never fatal: the
//!   free-text surface keeps working and a previous schema stays live

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commands::{ParamKind, COMMANDS};
use crate::config::PlatformConfig;

/// Platform option type for strings.
const OPTION_TYPE_STRING: u8 = 3;
/// Platform option type for numbers (floating point).
const OPTION_TYPE_NUMBER: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCommand {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub options: Vec<SchemaOption>,
}

/// The command table in registration format.
pub fn command_schema() -> Vec<SchemaCommand> {
    COMMANDS
        .iter()
        .map(|c| SchemaCommand {
            name: c.name.to_string(),
            description: c.description.to_string(),
            options: c
                .params
                .iter()
                .map(|p| SchemaOption {
                    name: p.name.to_string(),
                    kind: match p.kind {
                        ParamKind::String => OPTION_TYPE_STRING,
                        ParamKind::Number => OPTION_TYPE_NUMBER,
                    },
                    description: p.description.to_string(),
                    required: p.required,
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("schema registration request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("platform rejected schema ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Publishes [`command_schema`] under the configured application.
pub struct CommandRegistrar {
    http: reqwest::Client,
    api_base: String,
    token: String,
    application_id: String,
}

impl CommandRegistrar {
    pub fn new(config: &PlatformConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            application_id: config.application_id.clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/applications/{}/commands", self.api_base, self.application_id)
    }

    /// Overwrite the registered schema. Returns the number of commands sent.
    pub async fn register(&self) -> Result<usize, RegistrationError> {
        let schema = command_schema();
        tracing::info!(count = schema.len(), "Registering application commands");

        let response = self
            .http
            .put(self.endpoint())
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
            .json(&schema)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistrationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(count = schema.len(), "Application commands registered");
        Ok(schema.len())
    }
}
