use crate::domain::account::{AccountId, Amount, Balance};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identity of a pocket record, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PocketId(Uuid);

impl PocketId {
    /// Returns a fresh random identity. Called by store implementations when
    /// inserting a new record, never by the engines.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PocketId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

impl From<Uuid> for PocketId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<PocketId> for Uuid {
    fn from(id: PocketId) -> Self {
        id.0
    }
}

/// A named sub-account balance owned by exactly one account.
///
/// `owner` is set at creation and never reassigned. It exists for
/// validation; every balance change still goes through the engines. The
/// balance follows the same absent-means-zero convention as accounts.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Pocket {
    pub id: PocketId,
    pub name: String,
    pub balance: Option<Balance>,
    pub owner: AccountId,
}

impl Pocket {
    /// Adds funds, materializing an absent balance as zero first.
    pub fn credit(&mut self, amount: Amount) {
        let current = self.balance.unwrap_or(Balance::ZERO);
        self.balance = Some(current + Balance::from(amount));
    }
}

/// Caller-supplied prototype of a pocket. Carries at least a name; the
/// balance is stored as given, typically absent at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PocketDraft {
    pub name: String,
    pub balance: Option<Balance>,
}

impl PocketDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: None,
        }
    }
}
