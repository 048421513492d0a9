use crate::domain::account::AccountId;
use crate::domain::pocket::PocketId;
use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// A referenced identifier that does not resolve to a stored record.
///
/// These are never retried automatically; retrying only makes sense with a
/// different identifier.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotFoundError {
    #[error("origin account {0} does not exist")]
    OriginAccount(AccountId),
    #[error("destination account {0} does not exist")]
    DestinationAccount(AccountId),
    #[error("account {0} does not exist")]
    Account(AccountId),
    #[error("pocket {0} does not exist")]
    Pocket(PocketId),
}

/// A well-formed request that violates a domain rule.
///
/// Fatal to the current operation; the engines never retry or partially
/// apply a request that signals one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BusinessRuleError {
    #[error("amount must be present and greater than zero")]
    InvalidAmount,
    #[error("origin and destination account {0} are the same")]
    SameAccount(AccountId),
    #[error(
        "insufficient funds in account {account}: requested {requested}, effective balance {balance}"
    )]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },
    #[error("account {0} must be active")]
    AccountNotActive(AccountId),
    #[error("account {account} already has a pocket named {name:?}")]
    DuplicatePocketName { account: AccountId, name: String },
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    BusinessRule(#[from] BusinessRuleError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}
