use super::Decimal;
use serde::{Deserialize, Serialize, Serializer};

pub type AccountId = u64;

/// Serialize Decimal with exactly 2 decimal places
pub(super) fn serialize_decimal_2dp<S: Serializer>(
    value: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

/// Supported account currencies. No conversion logic exists anywhere in the
/// ledger; a currency is a label carried by the account.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// Philippine Peso, the default for new accounts.
    #[default]
    #[serde(rename = "PHP")]
    Php,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "RSD")]
    Rsd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Php => write!(f, "PHP"),
            Currency::Usd => write!(f, "USD"),
            Currency::Eur => write!(f, "EUR"),
            Currency::Rsd => write!(f, "RSD"),
        }
    }
}

/// A user-owned account holding a balance in a single currency.
///
/// The balance is only ever mutated through [`Account::credit`] and
/// [`Account::debit`]; external code reads snapshots. Balances never go
/// negative: `debit` refuses rather than overdraw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    id: AccountId,
    /// Opaque reference to an externally-owned user identity.
    owner: String,
    #[serde(serialize_with = "serialize_decimal_2dp")]
    balance: Decimal,
    currency: Currency,
}

impl Account {
    pub(super) fn new(id: AccountId, owner: String, currency: Currency, balance: Decimal) -> Self {
        Self {
            id,
            owner,
            balance,
            currency,
        }
    }

    /// Returns the account ID
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the owner reference
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Returns the account currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Credit the account, increasing the balance.
    /// Always succeeds for a validated (positive, scale <= 2) amount.
    pub(super) fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
        self.normalize();
        #[cfg(debug_assertions)]
        self.assert_invariant();
    }

    /// Debit the account, decreasing the balance.
    ///
    /// Returns `true` and subtracts only if the balance covers the amount;
    /// otherwise the balance is left untouched and `false` is returned.
    pub(super) fn debit(&mut self, amount: Decimal) -> bool {
        if self.balance < amount {
            return false;
        }
        self.balance -= amount;
        self.normalize();
        #[cfg(debug_assertions)]
        self.assert_invariant();
        true
    }

    /// Assert the fundamental ledger invariant: a balance is never negative
    /// after a completed operation.
    #[cfg(debug_assertions)]
    fn assert_invariant(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: account {} balance is negative ({})",
            self.id,
            self.balance
        );
    }

    /// Normalize the balance to trim trailing zeros.
    /// Keeps the internal representation compact and consistent.
    fn normalize(&mut self) {
        self.balance = self.balance.normalize();
    }
}

impl std::fmt::Display for Account {
    /// Formats as `id/owner/balance`, e.g. `1/nikola/100`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.id, self.owner, self.balance)
    }
}
