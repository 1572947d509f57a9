use crate::engine::{
    account::Currency,
    error::RequestError,
    request::{RequestKind, RequestRecord},
    Decimal,
};

/// A validated account-opening request.
///
/// Opens a new account for an owner with an optional opening balance.
/// Currency defaults to PHP when omitted; no conversion is ever applied.
#[derive(Debug, Clone)]
pub struct OpenAccount {
    owner: String,
    currency: Currency,
    opening_balance: Decimal,
}

impl OpenAccount {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }
}

impl TryFrom<RequestRecord> for OpenAccount {
    type Error = RequestError;

    fn try_from(record: RequestRecord) -> Result<Self, Self::Error> {
        match record {
            RequestRecord {
                kind: RequestKind::Open,
                owner: Some(owner),
                currency,
                from: None,
                to: None,
                amount,
            } if !owner.is_empty()
                && amount.is_none_or(|a| a >= Decimal::ZERO && a.scale() <= 2) =>
            {
                Ok(OpenAccount {
                    owner,
                    currency: currency.unwrap_or_default(),
                    opening_balance: amount.unwrap_or(Decimal::ZERO),
                })
            }
            record => Err(RequestError::InvalidRequest(record)),
        }
    }
}
