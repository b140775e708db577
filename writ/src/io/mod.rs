//! File output for compiled sources.

mod transaction;

pub use transaction::{Action, Transaction, WriteAction};
