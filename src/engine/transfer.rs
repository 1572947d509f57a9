use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{serialize_decimal_2dp, AccountId};
use super::Decimal;

pub type TransferId = u64;

/// Record of a completed transfer between two accounts.
///
/// A `Transfer` only exists once the underlying balance mutation has
/// succeeded; failed attempts leave no record. `started_ts` captures
/// engine entry, `created_ts` the moment the record was persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transfer {
    id: TransferId,
    from_account: AccountId,
    to_account: AccountId,
    #[serde(serialize_with = "serialize_decimal_2dp")]
    amount: Decimal,
    created_ts: DateTime<Utc>,
    started_ts: DateTime<Utc>,
}

impl Transfer {
    pub(super) fn new(
        id: TransferId,
        from_account: AccountId,
        to_account: AccountId,
        amount: Decimal,
        started_ts: DateTime<Utc>,
        created_ts: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            from_account,
            to_account,
            amount,
            created_ts,
            started_ts,
        }
    }

    /// Returns the transfer ID
    pub fn id(&self) -> TransferId {
        self.id
    }

    /// Returns the debited account ID
    pub fn from_account(&self) -> AccountId {
        self.from_account
    }

    /// Returns the credited account ID
    pub fn to_account(&self) -> AccountId {
        self.to_account
    }

    /// Returns the transferred amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns when the record was persisted
    pub fn created_ts(&self) -> DateTime<Utc> {
        self.created_ts
    }

    /// Returns when the transfer protocol began executing
    pub fn started_ts(&self) -> DateTime<Utc> {
        self.started_ts
    }
}

impl std::fmt::Display for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[transfer] id={} from={} to={} amount={}",
            self.id, self.from_account, self.to_account, self.amount
        )
    }
}

/// Error raised by a [`TransferJournal`] when a record cannot be written.
#[derive(Debug, thiserror::Error)]
#[error("journal write failed: {0}")]
pub struct JournalError(pub String);

/// Persistence seam for transfer records.
///
/// The engine appends a record as the final step of the transfer protocol,
/// while still holding both account locks. An implementation that can fail
/// (file, database) makes the engine roll back the balance mutation, so the
/// all-or-nothing guarantee survives a storage error.
pub trait TransferJournal: Send + Sync {
    /// Append a record. Called at most once per completed transfer.
    fn append(&self, transfer: &Transfer) -> Result<(), JournalError>;

    /// All records appended so far, in append order.
    fn transfers(&self) -> Vec<Transfer>;
}

/// In-memory journal, the default backing store.
#[derive(Debug, Default)]
pub struct InMemoryJournal {
    entries: Mutex<Vec<Transfer>>,
}

impl InMemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransferJournal for InMemoryJournal {
    fn append(&self, transfer: &Transfer) -> Result<(), JournalError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push(transfer.clone());
        Ok(())
    }

    fn transfers(&self) -> Vec<Transfer> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
