//! Free-text message adapter.
//!
//! `!createtransaction 5 alice bob` becomes command `createtransaction` with
//! parameters bound by position. The position of each parameter comes from
//! the command descriptor, the same table the structured schema is built
//! from, so both surfaces agree on parameter order.

use crate::adapters::event::{Outbound, PlatformEvent};
use crate::adapters::{InputAdapter, Outbox};
use crate::commands::{descriptor, CommandDescriptor, ParamSource, ParsedCommand, ReplySink};
use crate::reply::{Reply, Visibility};
use crate::wallets::PlatformId;

#[derive(Debug, Clone, Copy)]
pub struct FreeTextAdapter {
    prefix: char,
}

impl FreeTextAdapter {
    pub fn new(prefix: char) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }
}

impl InputAdapter for FreeTextAdapter {
    fn name(&self) -> &'static str {
        "free_text"
    }

    fn adapt(&self, event: &PlatformEvent, outbox: &Outbox) -> Option<ParsedCommand> {
        let PlatformEvent::Message(message) = event else {
            return None;
        };
        if message.author.bot {
            return None;
        }

        let rest = message.content.strip_prefix(self.prefix)?;
        // The command name must touch the prefix: "! help" is chat, not a command.
        if rest.starts_with(char::is_whitespace) {
            return None;
        }
        let mut tokens = rest.split_whitespace();
        let name = tokens.next()?.to_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let params = PositionalParams {
            descriptor: descriptor::find(&name),
            args,
        };

        Some(ParsedCommand::new(
            name,
            message.author.id.clone(),
            Box::new(params),
            Box::new(MessageSink {
                channel_id: message.channel_id.clone(),
                author_id: message.author.id.clone(),
                outbox: outbox.clone(),
            }),
        ))
    }
}

struct PositionalParams {
    /// `None` for unknown commands, which then have no parameters.
    descriptor: Option<&'static CommandDescriptor>,
    args: Vec<String>,
}

impl PositionalParams {
    fn arg(&self, name: &str) -> Option<&str> {
        let index = self.descriptor?.position(name)?;
        self.args.get(index).map(String::as_str)
    }
}

impl ParamSource for PositionalParams {
    fn string(&self, name: &str) -> Option<String> {
        self.arg(name).map(str::to_string)
    }

    /// Float parse; failures come back as absent.
    fn number(&self, name: &str) -> Option<f64> {
        self.arg(name).and_then(|s| s.parse::<f64>().ok())
    }
}

struct MessageSink {
    channel_id: String,
    author_id: PlatformId,
    outbox: Outbox,
}

impl ReplySink for MessageSink {
    fn deliver(&self, reply: &Reply) {
        let content = format!("**{}**\n{}", reply.payload.title, reply.payload.body);
        let outbound = match reply.visibility {
            Visibility::Public => Outbound::ChannelMessage {
                channel_id: self.channel_id.clone(),
                content,
            },
            // Never into the channel: private replies may carry keys.
            Visibility::Private => Outbound::DirectMessage {
                user_id: self.author_id.clone(),
                content,
            },
        };
        if self.outbox.send(outbound).is_err() {
            tracing::warn!(channel_id = %self.channel_id, "Reply dropped, outbox closed");
        }
    }
}
