use crate::engine::{
    account::AccountId,
    error::RequestError,
    request::{RequestKind, RequestRecord},
    Decimal,
};

/// A validated transfer request.
///
/// Moves funds from one account to another. The amount must be strictly
/// positive with at most two decimal places; the engine re-checks this and
/// the remaining semantic rules (distinct accounts, sufficient funds).
#[derive(Debug, Clone)]
pub struct TransferRequest {
    from: AccountId,
    to: AccountId,
    amount: Decimal,
}

impl TransferRequest {
    pub fn from(&self) -> AccountId {
        self.from
    }

    pub fn to(&self) -> AccountId {
        self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl TryFrom<RequestRecord> for TransferRequest {
    type Error = RequestError;

    fn try_from(record: RequestRecord) -> Result<Self, Self::Error> {
        match record {
            RequestRecord {
                kind: RequestKind::Transfer,
                owner: None,
                currency: None,
                from: Some(from),
                to: Some(to),
                amount: Some(amount),
            } if amount > Decimal::ZERO && amount.scale() <= 2 => Ok(TransferRequest {
                from,
                to,
                amount,
            }),
            record => Err(RequestError::InvalidRequest(record)),
        }
    }
}
