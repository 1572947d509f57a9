//! Ledger engine module.
//!
//! This module contains the core transfer processing logic including:
//! - `TransferEngine` - The atomic transfer orchestrator
//! - `Ledger` - Account storage and the per-account locking discipline
//! - `Account` / `Currency` - Account state
//! - `Transfer` - Persisted record of a completed transfer
//! - `Error` types - Request and processing errors

mod account;
mod error;
mod ledger;
mod request;
mod transfer;
mod transfer_engine;

pub(crate) use rust_decimal::Decimal;

pub use account::{Account, AccountId, Currency};
pub use error::{Error, ProcessingError, RequestError};
pub use ledger::Ledger;
pub use request::{OpenAccount, Request, RequestKind, RequestRecord, TransferRequest};
pub use transfer::{InMemoryJournal, JournalError, Transfer, TransferId, TransferJournal};
pub use transfer_engine::TransferEngine;
