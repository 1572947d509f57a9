use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, TryLockError};
use std::time::Instant;

use super::account::{Account, AccountId, Currency};
use super::error::ProcessingError;
use super::Decimal;

/// The collection of all accounts and their current balances.
///
/// Each account lives behind its own `Mutex`, so balance mutations are
/// read-modify-write atomic per account. The outer `RwLock` guards map
/// membership only and is never held while an account lock is held.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: RwLock<HashMap<AccountId, Arc<Mutex<Account>>>>,
    next_id: AtomicU64,
}

impl Ledger {
    /// Create a new empty `Ledger`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new account and return a snapshot of it.
    ///
    /// IDs are assigned monotonically starting at 1. Fails with
    /// `InvalidAmount` if the opening balance is negative or carries more
    /// than two decimal places.
    pub fn open_account(
        &self,
        owner: impl Into<String>,
        currency: Currency,
        opening_balance: Decimal,
    ) -> Result<Account, ProcessingError> {
        if opening_balance < Decimal::ZERO || opening_balance.scale() > 2 {
            return Err(ProcessingError::InvalidAmount {
                amount: opening_balance,
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let account = Account::new(id, owner.into(), currency, opening_balance);

        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        accounts.insert(id, Arc::new(Mutex::new(account.clone())));

        log::debug!("Opened account {account} ({currency})");
        Ok(account)
    }

    /// Snapshot of a single account, or `None` if the ID is unknown.
    ///
    /// Display reads go through here; they are snapshot-consistent but not
    /// linearized with in-flight transfers.
    pub fn account(&self, id: AccountId) -> Option<Account> {
        let cell = self.cell(id)?;
        let guard = cell.lock().unwrap_or_else(PoisonError::into_inner);
        Some(guard.clone())
    }

    /// Snapshot of all accounts, ordered by ID.
    pub fn accounts(&self) -> Vec<Account> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        let mut snapshot: Vec<Account> = accounts
            .values()
            .map(|cell| cell.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .collect();
        snapshot.sort_by_key(Account::id);
        snapshot
    }

    /// Returns the number of accounts in the ledger
    pub fn account_count(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The shared cell holding an account, for callers that need to lock it.
    pub(super) fn cell(&self, id: AccountId) -> Option<Arc<Mutex<Account>>> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts.get(&id).cloned()
    }
}

/// Acquire an account lock, polling until `deadline`.
///
/// Fails with `Busy` instead of blocking indefinitely when the account is
/// contended past the deadline. A poisoned lock is recovered: the credit and
/// debit primitives each apply a single assignment, so a panicked holder
/// cannot leave a half-applied mutation behind.
pub(super) fn lock_with_deadline(
    id: AccountId,
    cell: &Mutex<Account>,
    deadline: Instant,
) -> Result<MutexGuard<'_, Account>, ProcessingError> {
    loop {
        match cell.try_lock() {
            Ok(guard) => return Ok(guard),
            Err(TryLockError::Poisoned(poisoned)) => return Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => {
                if Instant::now() >= deadline {
                    log::warn!("Timed out waiting for lock on account {id}");
                    return Err(ProcessingError::Busy { account: id });
                }
                std::thread::yield_now();
            }
        }
    }
}
