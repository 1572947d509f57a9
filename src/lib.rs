//! A minimal ledger: user-owned monetary accounts and atomic point-to-point
//! transfers between them.
//!
//! The crate exposes two cooperating pieces:
//! - [`Ledger`] - stores accounts and provides the only sanctioned balance
//!   mutation primitives, guarded per-account.
//! - [`TransferEngine`] - executes a single atomic transfer between two
//!   accounts: either both balances move and a [`Transfer`] record is
//!   persisted, or nothing changes at all.
//!
//! A batch surface ([`TransferEngine::process_requests`]) drives the engine
//! from a CSV stream of `open` and `transfer` requests, the same way the CLI
//! binary does.

mod engine;

pub use engine::{
    Account, AccountId, Currency, Error, InMemoryJournal, JournalError, Ledger, OpenAccount,
    ProcessingError, Request, RequestError, RequestKind, RequestRecord, Transfer, TransferEngine,
    TransferId, TransferJournal, TransferRequest,
};
