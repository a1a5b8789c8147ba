//! Shared fixtures for unit tests: signed transactions, signed blocks and a
//! ledger bootstrapped with a genesis block.

pub mod test_utils;

pub use test_utils::*;
