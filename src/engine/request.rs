mod open;
mod transfer;

pub use open::OpenAccount;
pub use transfer::TransferRequest;

use super::account::{AccountId, Currency};
use super::error::RequestError;
use super::Decimal;
use serde::Deserialize;

/// Raw request record as parsed from CSV input.
/// This is the unvalidated form that needs conversion to a specific Request type.
#[derive(Debug, Deserialize, Clone)]
pub struct RequestRecord {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    /// Owner reference: required for Open, must be absent for Transfer
    pub owner: Option<String>,
    /// Currency: optional for Open (defaults to PHP), must be absent for Transfer
    pub currency: Option<Currency>,
    /// Source account: required for Transfer, must be absent for Open
    pub from: Option<AccountId>,
    /// Destination account: required for Transfer, must be absent for Open
    pub to: Option<AccountId>,
    /// Amount: transfer amount, or opening balance for Open (defaults to 0)
    pub amount: Option<Decimal>,
}

impl std::fmt::Display for RequestRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.owner, self.from, self.to) {
            (Some(owner), _, _) => write!(
                f,
                "{} (owner: {}, amount: {:?})",
                self.kind, owner, self.amount
            ),
            (None, Some(from), Some(to)) => write!(
                f,
                "{} (from: {}, to: {}, amount: {:?})",
                self.kind, from, to, self.amount
            ),
            _ => write!(f, "{} (amount: {:?})", self.kind, self.amount),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Open,
    Transfer,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::Open => write!(f, "open"),
            RequestKind::Transfer => write!(f, "transfer"),
        }
    }
}

/// A validated request ready for processing by the transfer engine.
#[derive(Debug, Clone)]
pub enum Request {
    Open(OpenAccount),
    Transfer(TransferRequest),
}

impl TryFrom<RequestRecord> for Request {
    type Error = RequestError;

    fn try_from(record: RequestRecord) -> Result<Self, Self::Error> {
        match record.kind {
            RequestKind::Open => Ok(Request::Open(OpenAccount::try_from(record)?)),
            RequestKind::Transfer => Ok(Request::Transfer(TransferRequest::try_from(record)?)),
        }
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::Open(open) => {
                write!(
                    f,
                    "[open] owner={} currency={} balance={}",
                    open.owner(),
                    open.currency(),
                    open.opening_balance()
                )
            }
            Request::Transfer(transfer) => {
                write!(
                    f,
                    "[transfer] from={} to={} amount={}",
                    transfer.from(),
                    transfer.to(),
                    transfer.amount()
                )
            }
        }
    }
}
