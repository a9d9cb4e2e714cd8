//! Response formatting.
//!
//! The formatter produces a [`ReplyPayload`] and a [`Visibility`]; turning
//! that into an embed or a plain-text message is the adapter sink's job.

pub mod formatter;
pub mod payload;

pub use formatter::{format_failure, format_success, unknown_command};
pub use payload::{Reply, ReplyPayload, Severity, Visibility};
