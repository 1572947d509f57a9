use std::io::{Read, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::Utc;

use super::account::{Account, AccountId};
use super::error::{Error, ProcessingError};
use super::ledger::{lock_with_deadline, Ledger};
use super::request::{Request, RequestRecord};
use super::transfer::{InMemoryJournal, Transfer, TransferJournal};
use super::Decimal;

/// How long a transfer waits for a contended account before failing `Busy`.
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(500);

/// The core transfer engine.
///
/// Executes atomic transfers between [`Ledger`] accounts: debit, credit and
/// journal append happen as one isolated unit under both account locks, so a
/// caller either observes the whole transfer or none of it.
///
/// All methods take `&self`; the engine is meant to be shared across request
/// handling threads behind an `Arc`.
pub struct TransferEngine {
    ledger: Ledger,
    journal: Box<dyn TransferJournal>,
    next_transfer_id: AtomicU64,
    lock_timeout: Duration,
}

impl Default for TransferEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferEngine {
    /// Create a new `TransferEngine` with an empty ledger and an in-memory
    /// journal.
    pub fn new() -> Self {
        log::trace!("TransferEngine initialized");
        Self::with_journal(Box::new(InMemoryJournal::new()))
    }

    /// Create a `TransferEngine` backed by a custom journal.
    pub fn with_journal(journal: Box<dyn TransferJournal>) -> Self {
        Self {
            ledger: Ledger::new(),
            journal,
            next_transfer_id: AtomicU64::new(0),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override the lock-acquisition timeout.
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    /// The underlying account ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns the number of accounts in the engine
    pub fn account_count(&self) -> usize {
        self.ledger.account_count()
    }

    /// Execute one atomic transfer of `amount` from `from` to `to`.
    ///
    /// On success both balances have moved and the returned [`Transfer`]
    /// record has been persisted. On any error, neither balance has changed
    /// and no record exists; see [`ProcessingError`] for the kinds.
    pub fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<Transfer, ProcessingError> {
        log::trace!("[transfer] from={from} to={to} amount={amount}");

        if amount <= Decimal::ZERO || amount.scale() > 2 {
            return Err(ProcessingError::InvalidAmount { amount });
        }
        if from == to {
            return Err(ProcessingError::SelfTransfer { account: from });
        }

        let started_ts = Utc::now();

        let from_cell = self
            .ledger
            .cell(from)
            .ok_or(ProcessingError::AccountNotFound { account: from })?;
        let to_cell = self
            .ledger
            .cell(to)
            .ok_or(ProcessingError::AccountNotFound { account: to })?;

        // Both locks are taken in ascending account-id order, never in
        // argument order, so two opposite-direction transfers on the same
        // pair cannot deadlock.
        let deadline = Instant::now() + self.lock_timeout;
        let (mut source, mut destination) = if from < to {
            let source = lock_with_deadline(from, &from_cell, deadline)?;
            let destination = lock_with_deadline(to, &to_cell, deadline)?;
            (source, destination)
        } else {
            let destination = lock_with_deadline(to, &to_cell, deadline)?;
            let source = lock_with_deadline(from, &from_cell, deadline)?;
            (source, destination)
        };

        if !source.debit(amount) {
            return Err(ProcessingError::InsufficientFunds {
                account: from,
                available: source.balance(),
                requested: amount,
            });
        }
        destination.credit(amount);

        let id = self.next_transfer_id.fetch_add(1, Ordering::Relaxed) + 1;
        let record = Transfer::new(id, from, to, amount, started_ts, Utc::now());

        if let Err(e) = self.journal.append(&record) {
            // Undo debit and credit while both guards are still held, so the
            // half-applied state is never observable.
            let undone = destination.debit(amount);
            debug_assert!(undone, "rollback debit cannot fail");
            source.credit(amount);
            log::error!("[transfer] journal append failed, rolled back: {e}");
            return Err(ProcessingError::Persistence(e));
        }

        log::trace!(
            "[transfer] id={} from={} to={} amount={} -> source_balance={} destination_balance={}",
            id,
            from,
            to,
            amount,
            source.balance(),
            destination.balance()
        );
        Ok(record)
    }

    /// Primary batch API: process requests from any source (File, `TcpStream`, etc.)
    /// Note that the CSV reader is buffered automatically, so you should not wrap rdr in a buffered reader like `io::BufReader`.
    pub fn process_requests<R: Read>(&self, reader: R) -> Result<(), Error> {
        log::info!("Starting request processing");

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All) // trim whitespace from fields
            .from_reader(reader);

        let mut processed = 0u64;
        let mut skipped = 0u64;

        for result in csv_reader.deserialize() {
            // Step 1: Parse CSV record into raw dirty RequestRecord
            let record: RequestRecord = result?;

            let row_num = processed + skipped + 1;
            log::trace!("[row {row_num}] Parsing: {record}");

            // Step 2: Convert raw dirty RequestRecord into validated Request
            let request = Request::try_from(record)?;

            // Step 3: Process validated Request
            if let Err(e) = self.process_request(request) {
                log::warn!("[row {row_num}] - Skipped: {e}");
                skipped += 1;
            } else {
                processed += 1;
            }
        }

        log::info!(
            "Processing complete: {} processed, {} skipped, {} accounts",
            processed,
            skipped,
            self.ledger.account_count()
        );
        Ok(())
    }

    /// Secondary API: write the account table to any sink (Stdout, File, `TcpStream`, etc.)
    /// Note that the CSV writer is buffered automatically, so you should not wrap wtr in a buffered writer like `io::BufWriter`.
    pub fn export_accounts<W: Write>(&self, writer: W) -> Result<(), Error> {
        let accounts = self.ledger.accounts();
        log::info!("Exporting {} accounts", accounts.len());

        let mut csv_writer = csv::Writer::from_writer(writer);
        for account in accounts {
            csv_writer.serialize(account)?;
        }
        csv_writer.flush()?;

        log::trace!("Account export complete");
        Ok(())
    }

    /// Write the transfer table to any sink, in append order.
    pub fn export_transfers<W: Write>(&self, writer: W) -> Result<(), Error> {
        let transfers = self.journal.transfers();
        log::info!("Exporting {} transfers", transfers.len());

        let mut csv_writer = csv::Writer::from_writer(writer);
        for transfer in transfers {
            csv_writer.serialize(transfer)?;
        }
        csv_writer.flush()?;

        log::trace!("Transfer export complete");
        Ok(())
    }

    fn process_request(&self, request: Request) -> Result<(), ProcessingError> {
        log::trace!("Processing request: {request}");
        match request {
            Request::Open(open) => {
                let account = self.ledger.open_account(
                    open.owner(),
                    open.currency(),
                    open.opening_balance(),
                )?;
                log::trace!("[open] owner={} -> account {}", open.owner(), account);
                Ok(())
            }
            Request::Transfer(request) => {
                let transfer = self.transfer(request.from(), request.to(), request.amount())?;
                log::trace!("Completed {transfer}");
                Ok(())
            }
        }
    }
}

// Accessor used by tests and callers that want the raw records without CSV.
impl TransferEngine {
    /// Snapshot of one account, or `None` if unknown.
    pub fn account(&self, id: AccountId) -> Option<Account> {
        self.ledger.account(id)
    }

    /// All persisted transfer records, in append order.
    pub fn transfers(&self) -> Vec<Transfer> {
        self.journal.transfers()
    }
}
