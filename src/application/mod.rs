//! Application layer. Each engine call runs one ledger operation inside its
//! own transaction scope on the injected store: business validations first,
//! then the resulting writes staged and committed as a unit.

pub mod pocket;
pub mod transfer;
