//! Command registry and dispatch boundary.
//!
//! # Responsibilities
//! - Map command names to handlers (same table for every adapter)
//! - Validate required parameters against the command descriptor
//! - Convert every outcome or failure into exactly one delivered reply
//!
//! Nothing raised by a handler crosses this boundary.

use std::collections::HashMap;
use std::sync::Arc;

use crate::commands::descriptor;
use crate::commands::handlers::{
    Balance, CheckBalancePublicKey, CommandHandler, CreateTransaction, CreateWallet, GetPublicKey,
    HandlerContext, Help, MinePublicKey, MineUsername,
};
use crate::commands::parsed::ParsedCommand;
use crate::observability::metrics;
use crate::reply::{self, Reply};

/// Routes canonical commands to their handlers.
pub struct Dispatcher {
    ctx: HandlerContext,
    handlers: HashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl Dispatcher {
    /// Create a dispatcher with every built-in command registered.
    pub fn new(ctx: HandlerContext) -> Self {
        let mut dispatcher = Self::empty(ctx);
        dispatcher.register("createwallet", Arc::new(CreateWallet));
        dispatcher.register("getpublickey", Arc::new(GetPublicKey));
        dispatcher.register("createtransaction", Arc::new(CreateTransaction));
        dispatcher.register("minepublickey", Arc::new(MinePublicKey));
        dispatcher.register("mineusername", Arc::new(MineUsername));
        dispatcher.register("checkbalancepublickey", Arc::new(CheckBalancePublicKey));
        dispatcher.register("balance", Arc::new(Balance));
        dispatcher.register("help", Arc::new(Help));
        dispatcher
    }

    /// Create a dispatcher with no handlers.
    pub fn empty(ctx: HandlerContext) -> Self {
        Self {
            ctx,
            handlers: HashMap::new(),
        }
    }

    /// Register (or replace) the handler for a command name.
    pub fn register(&mut self, name: &'static str, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(name, handler);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    /// Run one command to completion and deliver its reply.
    ///
    /// The delivered reply is also returned.
    pub async fn dispatch(&self, cmd: ParsedCommand) -> Reply {
        let reply = self.execute(&cmd).await;
        cmd.reply(&reply);
        reply
    }

    async fn execute(&self, cmd: &ParsedCommand) -> Reply {
        let name = cmd.name();

        let Some(handler) = self.handlers.get(name) else {
            tracing::info!(command = %name, actor = %cmd.actor_id(), "Unknown command");
            metrics::record_command("unknown", "unknown_command");
            return reply::unknown_command(name);
        };

        let validated = match descriptor::find(name) {
            Some(desc) => desc.validate(cmd),
            None => Ok(()),
        };

        let result = match validated {
            Ok(()) => handler.handle(&self.ctx, cmd).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(outcome) => {
                tracing::debug!(command = %name, actor = %cmd.actor_id(), "Command succeeded");
                metrics::record_command(name, "success");
                reply::format_success(&outcome)
            }
            Err(e) => {
                tracing::info!(command = %name, actor = %cmd.actor_id(), kind = e.kind(), error = %e, "Command failed");
                metrics::record_command(name, e.kind());
                reply::format_failure(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{command, FakeLedger};
    use crate::reply::{Severity, Visibility};
    use crate::wallets::WalletStore;
    use serde_json::json;

    fn dispatcher(ledger: Arc<FakeLedger>) -> Dispatcher {
        Dispatcher::new(HandlerContext {
            store: WalletStore::new(None),
            ledger,
            prefix: '!',
        })
    }

    #[test]
    fn test_every_descriptor_has_a_handler() {
        let d = dispatcher(Arc::new(FakeLedger::default()));
        for c in descriptor::COMMANDS {
            assert!(d.is_registered(c.name), "{} has no handler", c.name);
        }
    }

    #[tokio::test]
    async fn test_unknown_command_replies_once() {
        let ledger = Arc::new(FakeLedger::default());
        let d = dispatcher(ledger.clone());
        let (cmd, replies) = command("frobnicate", "U1", &[]);

        let reply = d.dispatch(cmd).await;

        assert_eq!(reply, reply::unknown_command("frobnicate"));
        assert_eq!(replies.lock().unwrap().clone(), vec![reply]);
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameter_is_validation_error() {
        let ledger = Arc::new(FakeLedger::default());
        let d = dispatcher(ledger.clone());
        let (cmd, _) = command("createtransaction", "U1", &[("payer", json!("alice"))]);

        let reply = d.dispatch(cmd).await;

        assert_eq!(reply.payload.title, "Error");
        assert!(reply.payload.body.contains("amount"));
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_wallet_reply_is_private() {
        let ledger = Arc::new(FakeLedger::default());
        let d = dispatcher(ledger);
        let (cmd, replies) = command("createwallet", "U1", &[("username", json!("alice"))]);

        let reply = d.dispatch(cmd).await;

        assert_eq!(reply.visibility, Visibility::Private);
        assert_eq!(reply.payload.severity, Severity::Success);
        assert!(reply.payload.body.contains("PK-alice"));
        assert_eq!(replies.lock().unwrap().len(), 1);
        assert_eq!(d.context().store.len(), 1);
    }

    #[tokio::test]
    async fn test_unsaved_wallet_reply_is_private_error() {
        let path = std::env::temp_dir()
            .join(format!("ledger-bot-missing-dir-{}", uuid::Uuid::new_v4()))
            .join("wallets.json");
        let d = Dispatcher::new(HandlerContext {
            store: WalletStore::new(Some(path)),
            ledger: Arc::new(FakeLedger::default()),
            prefix: '!',
        });
        let (cmd, replies) = command("createwallet", "U1", &[("username", json!("alice"))]);

        let reply = d.dispatch(cmd).await;

        assert_eq!(reply.visibility, Visibility::Private);
        assert_eq!(reply.payload.severity, Severity::Error);
        assert!(reply.payload.body.contains("PK-alice"));
        assert_eq!(replies.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_api_error_becomes_error_reply() {
        let d = dispatcher(Arc::new(FakeLedger::rejecting("Wallet not found")));
        let (cmd, _) = command("getpublickey", "U1", &[("username", json!("ghost"))]);

        let reply = d.dispatch(cmd).await;

        assert_eq!(reply.payload.severity, Severity::Error);
        assert_eq!(reply.payload.body, "Wallet not found");
    }

    #[tokio::test]
    async fn test_help_lists_commands() {
        let d = dispatcher(Arc::new(FakeLedger::default()));
        let (cmd, _) = command("help", "U1", &[]);

        let reply = d.dispatch(cmd).await;

        assert_eq!(reply.payload.severity, Severity::Info);
        assert!(reply.payload.body.contains("!createtransaction <amount> <payer> <payee>"));
    }

    #[tokio::test]
    async fn test_replaced_handler_is_used() {
        struct Fixed;

        #[async_trait::async_trait]
        impl CommandHandler for Fixed {
            async fn handle(
                &self,
                _ctx: &HandlerContext,
                _cmd: &ParsedCommand,
            ) -> crate::commands::CommandResult<crate::commands::Outcome> {
                Ok(crate::commands::Outcome::Help { text: "fixed".into() })
            }
        }

        let mut d = dispatcher(Arc::new(FakeLedger::default()));
        d.register("help", Arc::new(Fixed));
        let (cmd, _) = command("help", "U1", &[]);

        assert_eq!(d.dispatch(cmd).await.payload.body, "fixed");
    }
}
