//! Core ledger functionality
//!
//! Hashes, transactions, merkle commitments, blocks, the chain validator and
//! the header ledger itself.

pub mod block;
pub mod blockchain;
pub mod hash;
pub mod merkle;
pub mod transaction;
pub mod validator;

pub use block::{Block, Header, HEADER_LEN};
pub use blockchain::{BlockAdded, Blockchain};
pub use hash::{Hash, HashTarget, Hasher, HASH_LEN};
pub use merkle::{compute_merkle_root, hash_pair, merkle_root_from_hashes, MerkleProof, ProofElement};
pub use transaction::Transaction;
pub use validator::{BlockValidator, ChainState, Validator};
