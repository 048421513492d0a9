//! Domain layer: ledger records, monetary value objects, and the store port
//! the engines depend on.

pub mod account;
pub mod pocket;
pub mod ports;
