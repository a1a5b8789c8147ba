//! # Ledger Core - append-only signed block ledger
//!
//! A single-signer chain: every block is signed by one validator key, commits
//! its transactions through a merkle root and links to its parent by header
//! hash. Accepted headers are kept in memory.
//!
//! ## How the code is organized
//! - `core/`: hashes, transactions, merkle roots, blocks, the chain validator
//!   and the header ledger
//! - `wallet/`: Ed25519 keys, signatures and addresses
//! - `storage/`: the memory pool and its ordered container
//! - `config/`: TOML + environment settings
//! - `utils/`: digests, timestamps, bincode transport encoding
//! - `cli/`: arguments for the demo binary
//!
//! ## Flow
//! 1. Build and sign a [`Transaction`], submit it to the [`MemoryPool`]
//! 2. A producer drains pending transactions into a [`Block`] and signs it
//! 3. [`Blockchain::add_block`] runs the [`BlockValidator`] and appends the
//!    header, returning a [`BlockAdded`] fact for logging
//!
//! The pool is not reconciled with the chain: draining is the producer's job.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod utils;
pub mod wallet;

#[cfg(test)]
pub mod testnet;

pub use cli::Opt;
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    compute_merkle_root, Block, BlockAdded, BlockValidator, Blockchain, ChainState, Hash,
    HashTarget, Hasher, Header, MerkleProof, Transaction, Validator,
};
pub use error::{LedgerError, Result};
pub use storage::{Identified, MemoryPool, OrderedList, TxMap};
pub use utils::{current_timestamp, deserialize, serialize, sha256_digest};
pub use wallet::{generate_keypair, sign, verify, Address, PrivateKey, PublicKey, Signature};
