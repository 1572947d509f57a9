use crate::engine::account::AccountId;
use crate::engine::request::RequestRecord;
use crate::engine::transfer::JournalError;
use crate::engine::Decimal;

/// Top-level error type for the ledger engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Request error: {0}")]
    Request(#[from] RequestError),
}

/// Errors during `RequestRecord` -> `Request` conversion (hard errors).
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid request: {0}")]
    InvalidRequest(RequestRecord),
}

/// Soft (per-request) errors during processing.
/// These don't stop batch processing, we log and continue.
///
/// Every kind here means "no funds moved": a transfer that fails for any of
/// these reasons leaves both balances untouched and persists no record.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    #[error("Account {account} cannot transfer to itself")]
    SelfTransfer { account: AccountId },

    #[error("Insufficient funds: account {account} has {available}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        available: Decimal,
        requested: Decimal,
    },

    #[error("Account {account} not found")]
    AccountNotFound { account: AccountId },

    #[error("Account {account} is locked by another transfer, try again")]
    Busy { account: AccountId },

    #[error("Failed to persist transfer record: {0}")]
    Persistence(#[from] JournalError),
}
