//! Successful command results, before formatting.

use crate::ledger::Lookup;

/// What a balance lookup was keyed by.
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceSubject {
    Username(String),
    PublicKey(String),
}

/// Domain value a handler returns on success.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    WalletCreated {
        username: String,
        private_key: String,
    },
    PublicKey {
        username: String,
        lookup: Lookup,
    },
    TransactionSubmitted {
        amount: f64,
        payer: String,
        payee: String,
        message: Option<String>,
    },
    Mined {
        miner: String,
        message: Option<String>,
    },
    Balance {
        subject: BalanceSubject,
        lookup: Lookup,
    },
    Help {
        text: String,
    },
}
