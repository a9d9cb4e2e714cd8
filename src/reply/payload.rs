//! Uniform reply representation shared by every command and adapter.

use serde::Serialize;

/// How a reply should look to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// Accent color used by rich embeds.
    pub fn color(self) -> u32 {
        match self {
            Severity::Info => 0x3498DB,
            Severity::Success => 0x2ECC71,
            Severity::Error => 0xE74C3C,
        }
    }
}

/// Who may see a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    /// Only the invoking actor. Required for anything carrying a private key.
    Private,
}

/// Rendering-agnostic reply content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyPayload {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl ReplyPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity,
        }
    }
}

/// A payload together with its delivery visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub payload: ReplyPayload,
    pub visibility: Visibility,
}

impl Reply {
    pub fn public(payload: ReplyPayload) -> Self {
        Self {
            payload,
            visibility: Visibility::Public,
        }
    }

    pub fn private(payload: ReplyPayload) -> Self {
        Self {
            payload,
            visibility: Visibility::Private,
        }
    }
}
