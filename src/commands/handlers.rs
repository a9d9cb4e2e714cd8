//! Command handlers.
//!
//! Each handler is adapter-agnostic: it reads parameters from the
//! [`ParsedCommand`], consults the guard, calls the ledger and returns an
//! [`Outcome`]. Formatting and delivery happen in the dispatcher.

use async_trait::async_trait;
use std::sync::Arc;

use crate::auth;
use crate::commands::descriptor;
use crate::commands::error::{CommandError, CommandResult};
use crate::commands::outcome::{BalanceSubject, Outcome};
use crate::commands::parsed::ParsedCommand;
use crate::ledger::{LedgerApi, TransactionRequest};
use crate::wallets::{WalletRecord, WalletStore};

/// Shared dependencies injected into every handler.
#[derive(Clone)]
pub struct HandlerContext {
    pub store: WalletStore,
    pub ledger: Arc<dyn LedgerApi>,
    /// Free-text prefix, for help output.
    pub prefix: char,
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &HandlerContext, cmd: &ParsedCommand) -> CommandResult<Outcome>;
}

pub struct CreateWallet;

#[async_trait]
impl CommandHandler for CreateWallet {
    async fn handle(&self, ctx: &HandlerContext, cmd: &ParsedCommand) -> CommandResult<Outcome> {
        let username = cmd.require_string("username")?;
        let owner = cmd.actor_id();

        // Held until the record is persisted so a concurrent createwallet
        // from the same actor sees it.
        let _owner_guard = ctx.store.lock_owner(owner).await;

        if !auth::can_create_wallet(&ctx.store, owner) {
            let existing = ctx.store.get(owner).map(|r| r.username).unwrap_or_default();
            return Err(CommandError::Authorization(format!(
                "You already own a wallet (`{}`). Only one wallet per user is allowed.",
                existing
            )));
        }

        let private_key = ctx.ledger.create_wallet(&username).await?;

        let record = WalletRecord::new(username.clone(), private_key.clone());
        ctx.store.set(owner.clone(), record.clone());
        if let Err(source) = ctx.store.persist() {
            // The remote wallet exists, so the record stays in memory.
            tracing::error!(owner = %owner, username = %username, error = %source, "Wallet created but not persisted");
            return Err(CommandError::Persistence { record, source });
        }

        tracing::info!(owner = %owner, username = %username, "Wallet created");
        Ok(Outcome::WalletCreated { username, private_key })
    }
}

pub struct GetPublicKey;

#[async_trait]
impl CommandHandler for GetPublicKey {
    async fn handle(&self, ctx: &HandlerContext, cmd: &ParsedCommand) -> CommandResult<Outcome> {
        let username = cmd.require_string("username")?;
        let lookup = ctx.ledger.get_public_key(&username).await?;
        Ok(Outcome::PublicKey { username, lookup })
    }
}

pub struct CreateTransaction;

#[async_trait]
impl CommandHandler for CreateTransaction {
    async fn handle(&self, ctx: &HandlerContext, cmd: &ParsedCommand) -> CommandResult<Outcome> {
        let amount = cmd.require_number("amount")?;
        let payer = cmd.require_string("payer")?;
        let payee = cmd.require_string("payee")?;

        if amount <= 0.0 {
            return Err(CommandError::Validation("Amount must be greater than zero.".into()));
        }

        let record = match auth::can_spend(&ctx.store, cmd.actor_id(), &payer) {
            Some(record) => record,
            None => {
                let message = match ctx.store.get(cmd.actor_id()) {
                    Some(own) => format!(
                        "You can only send from your own wallet (`{}`), not `{}`.",
                        own.username, payer
                    ),
                    None => "You do not own a wallet. Create one with createwallet first.".to_string(),
                };
                tracing::warn!(actor = %cmd.actor_id(), payer = %payer, "Spend denied");
                return Err(CommandError::Authorization(message));
            }
        };

        let request = TransactionRequest {
            amount,
            payer: payer.clone(),
            payee: payee.clone(),
            private_key: record.private_key,
        };
        let message = ctx.ledger.create_transaction(&request).await?;

        Ok(Outcome::TransactionSubmitted { amount, payer, payee, message })
    }
}

pub struct MinePublicKey;

#[async_trait]
impl CommandHandler for MinePublicKey {
    async fn handle(&self, ctx: &HandlerContext, cmd: &ParsedCommand) -> CommandResult<Outcome> {
        let miner = cmd.require_string("publickey")?;
        let message = ctx.ledger.mine_by_public_key(&miner).await?;
        Ok(Outcome::Mined { miner, message })
    }
}

pub struct MineUsername;

#[async_trait]
impl CommandHandler for MineUsername {
    async fn handle(&self, ctx: &HandlerContext, cmd: &ParsedCommand) -> CommandResult<Outcome> {
        let miner = cmd.require_string("username")?;
        let message = ctx.ledger.mine_by_username(&miner).await?;
        Ok(Outcome::Mined { miner, message })
    }
}

pub struct CheckBalancePublicKey;

#[async_trait]
impl CommandHandler for CheckBalancePublicKey {
    async fn handle(&self, ctx: &HandlerContext, cmd: &ParsedCommand) -> CommandResult<Outcome> {
        let public_key = cmd.require_string("publickey")?;
        let lookup = ctx.ledger.check_balance_by_public_key(&public_key).await?;
        Ok(Outcome::Balance {
            subject: BalanceSubject::PublicKey(public_key),
            lookup,
        })
    }
}

/// Balance by username. Deliberately unguarded: balances are public.
pub struct Balance;

#[async_trait]
impl CommandHandler for Balance {
    async fn handle(&self, ctx: &HandlerContext, cmd: &ParsedCommand) -> CommandResult<Outcome> {
        let username = cmd.require_string("username")?;
        let lookup = ctx.ledger.check_balance_by_username(&username).await?;
        Ok(Outcome::Balance {
            subject: BalanceSubject::Username(username),
            lookup,
        })
    }
}

pub struct Help;

#[async_trait]
impl CommandHandler for Help {
    async fn handle(&self, ctx: &HandlerContext, _cmd: &ParsedCommand) -> CommandResult<Outcome> {
        Ok(Outcome::Help {
            text: descriptor::help_text(ctx.prefix),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{command, FakeLedger};
    use crate::ledger::Lookup;
    use serde_json::json;

    fn context(ledger: Arc<FakeLedger>) -> HandlerContext {
        HandlerContext {
            store: WalletStore::new(None),
            ledger,
            prefix: '!',
        }
    }

    #[tokio::test]
    async fn test_create_wallet_stores_record() {
        let ledger = Arc::new(FakeLedger::default());
        let ctx = context(ledger.clone());
        let (cmd, _) = command("createwallet", "U1", &[("username", json!("alice"))]);

        let outcome = CreateWallet.handle(&ctx, &cmd).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::WalletCreated { username: "alice".into(), private_key: "PK-alice".into() }
        );
        assert_eq!(ctx.store.get(&"U1".into()), Some(WalletRecord::new("alice", "PK-alice")));
        assert_eq!(ledger.calls(), vec!["create_wallet:alice"]);
    }

    #[tokio::test]
    async fn test_second_wallet_denied_without_ledger_call() {
        let ledger = Arc::new(FakeLedger::default());
        let ctx = context(ledger.clone());
        ctx.store.set("U1".into(), WalletRecord::new("alice", "PK1"));

        let (cmd, _) = command("createwallet", "U1", &[("username", json!("alice2"))]);
        let err = CreateWallet.handle(&ctx, &cmd).await.unwrap_err();

        assert!(matches!(err, CommandError::Authorization(_)));
        assert!(ledger.calls().is_empty());
        assert_eq!(ctx.store.get(&"U1".into()), Some(WalletRecord::new("alice", "PK1")));
    }

    #[tokio::test]
    async fn test_ledger_rejection_leaves_store_untouched() {
        let ledger = Arc::new(FakeLedger::rejecting("Username taken"));
        let ctx = context(ledger.clone());
        let (cmd, _) = command("createwallet", "U1", &[("username", json!("alice"))]);

        let err = CreateWallet.handle(&ctx, &cmd).await.unwrap_err();

        assert!(matches!(err, CommandError::Api(_)));
        assert_eq!(err.to_string(), "Username taken");
        assert!(ctx.store.is_empty());
    }

    #[tokio::test]
    async fn test_unwritable_store_keeps_record_and_blocks_retry() {
        let ledger = Arc::new(FakeLedger::default());
        let path = std::env::temp_dir()
            .join(format!("ledger-bot-missing-dir-{}", uuid::Uuid::new_v4()))
            .join("wallets.json");
        let ctx = HandlerContext {
            store: WalletStore::new(Some(path)),
            ledger: ledger.clone(),
            prefix: '!',
        };

        let (cmd, _) = command("createwallet", "U1", &[("username", json!("alice"))]);
        let err = CreateWallet.handle(&ctx, &cmd).await.unwrap_err();

        assert_eq!(err.kind(), "persistence_error");
        match &err {
            CommandError::Persistence { record, .. } => {
                assert_eq!(record, &WalletRecord::new("alice", "PK-alice"));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(ctx.store.get(&"U1".into()), Some(WalletRecord::new("alice", "PK-alice")));

        let (retry, _) = command("createwallet", "U1", &[("username", json!("alice"))]);
        let err = CreateWallet.handle(&ctx, &retry).await.unwrap_err();

        assert_eq!(err.kind(), "authorization_error");
        assert_eq!(ledger.calls(), vec!["create_wallet:alice"]);
    }

    #[tokio::test]
    async fn test_concurrent_create_wallet_same_actor() {
        let ledger = Arc::new(FakeLedger::with_delay(std::time::Duration::from_millis(50)));
        let ctx = context(ledger.clone());

        let (first, _) = command("createwallet", "U1", &[("username", json!("alice"))]);
        let (second, _) = command("createwallet", "U1", &[("username", json!("alice-b"))]);

        let (a, b) = tokio::join!(CreateWallet.handle(&ctx, &first), CreateWallet.handle(&ctx, &second));

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        assert_eq!(ledger.calls().len(), 1);
        assert_eq!(ctx.store.len(), 1);
    }

    #[tokio::test]
    async fn test_transaction_uses_stored_key() {
        let ledger = Arc::new(FakeLedger::default());
        let ctx = context(ledger.clone());
        ctx.store.set("U1".into(), WalletRecord::new("alice", "PK1"));

        let (cmd, _) = command(
            "createtransaction",
            "U1",
            &[("amount", json!(5)), ("payer", json!("alice")), ("payee", json!("bob"))],
        );
        CreateTransaction.handle(&ctx, &cmd).await.unwrap();

        assert_eq!(
            ledger.transactions(),
            vec![TransactionRequest {
                amount: 5.0,
                payer: "alice".into(),
                payee: "bob".into(),
                private_key: "PK1".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_transaction_denied_for_other_payer() {
        let ledger = Arc::new(FakeLedger::default());
        let ctx = context(ledger.clone());
        ctx.store.set("U1".into(), WalletRecord::new("alice", "PK1"));

        let (cmd, _) = command(
            "createtransaction",
            "U1",
            &[("amount", json!(5)), ("payer", json!("carol")), ("payee", json!("bob"))],
        );
        let err = CreateTransaction.handle(&ctx, &cmd).await.unwrap_err();

        assert!(matches!(err, CommandError::Authorization(_)));
        assert!(err.to_string().contains("alice"));
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transaction_denied_without_wallet() {
        let ledger = Arc::new(FakeLedger::default());
        let ctx = context(ledger.clone());

        let (cmd, _) = command(
            "createtransaction",
            "U2",
            &[("amount", json!(1)), ("payer", json!("alice")), ("payee", json!("bob"))],
        );
        let err = CreateTransaction.handle(&ctx, &cmd).await.unwrap_err();

        assert!(matches!(err, CommandError::Authorization(_)));
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let ledger = Arc::new(FakeLedger::default());
        let ctx = context(ledger.clone());
        ctx.store.set("U1".into(), WalletRecord::new("alice", "PK1"));

        let (cmd, _) = command(
            "createtransaction",
            "U1",
            &[("amount", json!(-3)), ("payer", json!("alice")), ("payee", json!("bob"))],
        );
        let err = CreateTransaction.handle(&ctx, &cmd).await.unwrap_err();

        assert!(matches!(err, CommandError::Validation(_)));
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_balance_is_unguarded() {
        let ledger = Arc::new(FakeLedger::default());
        let ctx = context(ledger.clone());

        let (cmd, _) = command("balance", "U2", &[("username", json!("alice"))]);
        let outcome = Balance.handle(&ctx, &cmd).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Balance {
                subject: BalanceSubject::Username("alice".into()),
                lookup: Lookup::Value("100".into()),
            }
        );
        assert_eq!(ledger.calls(), vec!["check_balance_by_username:alice"]);
    }

    #[tokio::test]
    async fn test_mining_forwards_miner() {
        let ledger = Arc::new(FakeLedger::default());
        let ctx = context(ledger.clone());

        let (cmd, _) = command("minepublickey", "U2", &[("publickey", json!("04ab"))]);
        MinePublicKey.handle(&ctx, &cmd).await.unwrap();
        let (cmd, _) = command("mineusername", "U2", &[("username", json!("bob"))]);
        MineUsername.handle(&ctx, &cmd).await.unwrap();

        assert_eq!(ledger.calls(), vec!["mine_by_public_key:04ab", "mine_by_username:bob"]);
    }
}
