//! Maps command outcomes and failures to replies.
//!
//! # Rules
//! - Mutations succeed with `success`, lookups and help with `info`
//! - Every failure is titled "Error" with severity `error`
//! - A created wallet, saved or not, is always replied privately

use crate::commands::{BalanceSubject, CommandError, Outcome};
use crate::ledger::Lookup;
use crate::reply::payload::{Reply, ReplyPayload, Severity};

/// Build the reply for a successful command.
pub fn format_success(outcome: &Outcome) -> Reply {
    match outcome {
        Outcome::WalletCreated { username, private_key } => Reply::private(ReplyPayload::new(
            "Wallet created",
            format!(
                "Wallet `{}` created.\nPrivate key: `{}`\nKeep this key secret. It is stored with the bot to sign your transactions.",
                username, private_key
            ),
            Severity::Success,
        )),
        Outcome::PublicKey { username, lookup } => Reply::public(ReplyPayload::new(
            "Public key",
            match lookup {
                Lookup::Value(key) => format!("Public Key for {}: {}", username, key),
                Lookup::Message(message) => message.clone(),
            },
            Severity::Info,
        )),
        Outcome::TransactionSubmitted { amount, payer, payee, message } => {
            Reply::public(ReplyPayload::new(
                "Transaction submitted",
                message
                    .clone()
                    .unwrap_or_else(|| format!("Sent {} from {} to {}.", amount, payer, payee)),
                Severity::Success,
            ))
        }
        Outcome::Mined { miner, message } => Reply::public(ReplyPayload::new(
            "Mining complete",
            message
                .clone()
                .unwrap_or_else(|| format!("Mined a block for {}.", miner)),
            Severity::Success,
        )),
        Outcome::Balance { subject, lookup } => {
            let body = match lookup {
                Lookup::Value(balance) => match subject {
                    BalanceSubject::Username(name) => format!("Balance for username {}: {}", name, balance),
                    BalanceSubject::PublicKey(key) => format!("Balance for public key {}: {}", key, balance),
                },
                Lookup::Message(message) => message.clone(),
            };
            Reply::public(ReplyPayload::new("Balance", body, Severity::Info))
        }
        Outcome::Help { text } => Reply::public(ReplyPayload::new("Commands", text.clone(), Severity::Info)),
    }
}

/// Build the reply for a failed command.
///
/// A wallet that was created but not saved still hands its key to the actor,
/// so that reply is private.
pub fn format_failure(error: &CommandError) -> Reply {
    match error {
        CommandError::Persistence { record, .. } => Reply::private(ReplyPayload::new(
            "Error",
            format!(
                "{}\nPrivate key: `{}`\nStore this key yourself. Ask an operator to restore the wallet link before sending.",
                error, record.private_key
            ),
            Severity::Error,
        )),
        _ => Reply::public(ReplyPayload::new("Error", error.to_string(), Severity::Error)),
    }
}

/// Reply for a command name nobody registered. Identical for every adapter.
pub fn unknown_command(name: &str) -> Reply {
    Reply::public(ReplyPayload::new(
        "Unknown command",
        format!("Unknown command: {}. Use the help command to list available commands.", name),
        Severity::Error,
    ))
}
