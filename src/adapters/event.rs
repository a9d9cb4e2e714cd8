//! Platform event and outbound delivery types.
//!
//! Both are JSON, tagged by `type`, so a gateway bridge can forward events
//! to the ingress and apply the deliveries it gets back.

use serde::{Deserialize, Serialize};

use crate::wallets::PlatformId;

/// One inbound platform event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlatformEvent {
    Interaction(Interaction),
    Message(Message),
}

impl PlatformEvent {
    /// Platform id of the event itself.
    pub fn id(&self) -> &str {
        match self {
            PlatformEvent::Interaction(i) => &i.id,
            PlatformEvent::Message(m) => &m.id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    ApplicationCommand,
    Ping,
    Component,
}

/// A structured command invocation with named, typed options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub kind: InteractionKind,
    pub user_id: PlatformId,
    #[serde(default)]
    pub channel_id: Option<String>,
    pub data: InteractionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOption {
    pub name: String,
    pub value: serde_json::Value,
}

/// A plain chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub author: Author,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: PlatformId,
    #[serde(default)]
    pub bot: bool,
}

/// Rich embed used for interaction responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
}

/// One rendered delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    InteractionResponse {
        interaction_id: String,
        ephemeral: bool,
        embed: Embed,
    },
    ChannelMessage {
        channel_id: String,
        content: String,
    },
    DirectMessage {
        user_id: PlatformId,
        content: String,
    },
}
