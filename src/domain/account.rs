use crate::error::{BusinessRuleError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identity of an account record.
///
/// Identities are assigned by the store at insert time; the engines never
/// construct one and make no assumption about the generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Returns a fresh random identity. Called by store implementations when
    /// inserting a new record, never by the engines.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<AccountId> for Uuid {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

/// A stored monetary value.
///
/// Wrapper around `rust_decimal::Decimal` so balances and transfer amounts
/// cannot be mixed up with other numbers. Comparisons are exact.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

/// A validated, strictly positive operation amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(BusinessRuleError::InvalidAmount.into())
        }
    }

    /// Runs the presence-and-positivity check every funds-moving operation
    /// performs first: the value must be given and greater than zero.
    pub fn require(value: Option<Decimal>) -> Result<Self> {
        match value {
            Some(value) => Self::new(value),
            None => Err(BusinessRuleError::InvalidAmount.into()),
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = crate::error::LedgerError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Blocked,
}

/// A top-level monetary record.
///
/// The balance is optional at the record boundary: `None` means "no funds
/// recorded" and counts as zero in every arithmetic or comparison step, but
/// a plain read returns whatever was stored. Only a mutation materializes
/// the value.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    pub id: AccountId,
    pub balance: Option<Balance>,
    pub status: AccountStatus,
}

impl Account {
    /// The stored balance normalized for arithmetic, absent treated as zero.
    pub fn effective_balance(&self) -> Balance {
        self.balance.unwrap_or(Balance::ZERO)
    }

    /// Removes funds, failing when the effective balance cannot cover the
    /// amount. On success the balance is materialized even if it was absent
    /// before (an absent balance never covers a positive amount anyway).
    pub fn debit(&mut self, amount: Amount) -> Result<()> {
        let current = self.effective_balance();
        if current.0 < amount.value() {
            return Err(BusinessRuleError::InsufficientFunds {
                account: self.id,
                balance: current.0,
                requested: amount.value(),
            }
            .into());
        }
        self.balance = Some(current - Balance::from(amount));
        Ok(())
    }

    /// Adds funds, materializing an absent balance as zero first.
    pub fn credit(&mut self, amount: Amount) {
        self.balance = Some(self.effective_balance() + Balance::from(amount));
    }
}

/// Caller-supplied prototype of an account before the store assigns its
/// identity. Accounts are opened by external collaborators, not by the
/// engines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountDraft {
    pub balance: Option<Balance>,
    pub status: AccountStatus,
}

impl AccountDraft {
    pub fn with_balance(balance: Decimal) -> Self {
        Self {
            balance: Some(Balance::new(balance)),
            status: AccountStatus::Active,
        }
    }
}
