//! Structured interaction adapter.
//!
//! Parameters arrive named and typed by the platform, so lookups are direct
//! reads. Replies render as embeds; private replies are ephemeral.

use crate::adapters::event::{Embed, InteractionKind, InteractionOption, Outbound, PlatformEvent};
use crate::adapters::{InputAdapter, Outbox};
use crate::commands::{ParamSource, ParsedCommand, ReplySink};
use crate::reply::{Reply, Visibility};

#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredAdapter;

impl InputAdapter for StructuredAdapter {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn adapt(&self, event: &PlatformEvent, outbox: &Outbox) -> Option<ParsedCommand> {
        let PlatformEvent::Interaction(interaction) = event else {
            return None;
        };
        if interaction.kind != InteractionKind::ApplicationCommand {
            return None;
        }

        Some(ParsedCommand::new(
            interaction.data.name.clone(),
            interaction.user_id.clone(),
            Box::new(NamedParams(interaction.data.options.clone())),
            Box::new(InteractionSink {
                interaction_id: interaction.id.clone(),
                outbox: outbox.clone(),
            }),
        ))
    }
}

struct NamedParams(Vec<InteractionOption>);

impl NamedParams {
    fn value(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.iter().find(|o| o.name == name).map(|o| &o.value)
    }
}

impl ParamSource for NamedParams {
    fn string(&self, name: &str) -> Option<String> {
        self.value(name).and_then(|v| v.as_str()).map(str::to_string)
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(|v| v.as_f64())
    }
}

struct InteractionSink {
    interaction_id: String,
    outbox: Outbox,
}

impl ReplySink for InteractionSink {
    fn deliver(&self, reply: &Reply) {
        let outbound = Outbound::InteractionResponse {
            interaction_id: self.interaction_id.clone(),
            ephemeral: reply.visibility == Visibility::Private,
            embed: Embed {
                title: reply.payload.title.clone(),
                description: reply.payload.body.clone(),
                color: reply.payload.severity.color(),
            },
        };
        if self.outbox.send(outbound).is_err() {
            tracing::warn!(interaction_id = %self.interaction_id, "Reply dropped, outbox closed");
        }
    }
}
