//! Canonical command representation produced by the input adapters.

use crate::commands::error::{CommandError, CommandResult};
use crate::reply::Reply;
use crate::wallets::PlatformId;

/// Parameter lookup, by name for structured input or by position for free text.
pub trait ParamSource: Send + Sync {
    fn string(&self, name: &str) -> Option<String>;
    fn number(&self, name: &str) -> Option<f64>;
}

/// Delivery channel bound by the adapter that produced a command.
pub trait ReplySink: Send + Sync {
    fn deliver(&self, reply: &Reply);
}

/// One invocation, independent of how it arrived.
pub struct ParsedCommand {
    name: String,
    actor_id: PlatformId,
    params: Box<dyn ParamSource>,
    sink: Box<dyn ReplySink>,
}

impl ParsedCommand {
    pub fn new(
        name: impl Into<String>,
        actor_id: PlatformId,
        params: Box<dyn ParamSource>,
        sink: Box<dyn ReplySink>,
    ) -> Self {
        Self {
            name: name.into(),
            actor_id,
            params,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actor_id(&self) -> &PlatformId {
        &self.actor_id
    }

    /// String parameter; blank values count as absent.
    pub fn get_string(&self, param: &str) -> Option<String> {
        self.params
            .string(param)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Numeric parameter; NaN and infinities count as absent.
    pub fn get_number(&self, param: &str) -> Option<f64> {
        self.params.number(param).filter(|n| n.is_finite())
    }

    pub fn require_string(&self, param: &str) -> CommandResult<String> {
        self.get_string(param)
            .ok_or_else(|| CommandError::Validation(format!("Missing parameter `{}`", param)))
    }

    pub fn require_number(&self, param: &str) -> CommandResult<f64> {
        self.get_number(param)
            .ok_or_else(|| CommandError::Validation(format!("Parameter `{}` must be a number", param)))
    }

    /// Send a reply through the originating adapter's channel.
    pub fn reply(&self, reply: &Reply) {
        self.sink.deliver(reply);
    }
}

impl std::fmt::Debug for ParsedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedCommand")
            .field("name", &self.name)
            .field("actor_id", &self.actor_id)
            .finish_non_exhaustive()
    }
}
