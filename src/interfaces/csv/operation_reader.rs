use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of an operations script.
///
/// `source` always references the account the operation acts on. `target`
/// carries the second reference when the operation has one: the destination
/// account of a transfer, or the pocket of a create/move. References are
/// script-local labels or literal record identifiers; the driver resolves
/// them.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OperationRecord {
    pub op: OpKind,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OpKind {
    /// Register a new account under the `source` label, with `amount` as
    /// its initial balance (absent for none).
    Open,
    /// Set the `source` account's status to blocked.
    Block,
    /// Move `amount` from `source` to the `target` account.
    Transfer,
    /// Create a pocket called `name` under `source`, labelled `target`.
    CreatePocket,
    /// Move `amount` from `source` into the `target` pocket.
    Move,
}

/// Reads ledger operations from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<OperationRecord>`. It handles whitespace trimming and flexible
/// record lengths automatically, so trailing columns an operation does not
/// use can be left off.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes operations.
    pub fn operations(self) -> impl Iterator<Item = Result<OperationRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
