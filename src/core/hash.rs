use crate::core::{Header, Transaction};
use crate::error::{LedgerError, Result};
use crate::utils::sha256_digest;
use data_encoding::HEXLOWER;
use serde::{Serialize, Serializer};
use std::fmt;

pub const HASH_LEN: usize = 32;

/// 32-byte SHA-256 digest. The all-zero value means "unset".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, bincode::Encode, bincode::Decode,
)]
pub struct Hash([u8; HASH_LEN]);

impl Hash {
    pub const ZERO: Hash = Hash([0u8; HASH_LEN]);

    pub fn new(bytes: [u8; HASH_LEN]) -> Hash {
        Hash(bytes)
    }

    /// SHA-256 of arbitrary bytes
    pub fn digest(data: &[u8]) -> Hash {
        Hash(sha256_digest(data))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Hash> {
        let value: [u8; HASH_LEN] = bytes
            .try_into()
            .map_err(|_| LedgerError::InvalidHashLength(bytes.len()))?;
        Ok(Hash(value))
    }

    pub fn from_hex(value: &str) -> Result<Hash> {
        let bytes = HEXLOWER
            .decode(value.as_bytes())
            .map_err(|e| LedgerError::Serialization(format!("Invalid hash hex: {e}")))?;
        Hash::from_bytes(&bytes)
    }

    pub fn is_unset(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn to_hex(&self) -> String {
        HEXLOWER.encode(&self.0)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// What is being hashed. Each kind has its own preimage:
/// - `Header`: the fixed 80-byte encoding from [`Header::to_bytes`]
/// - `Transaction`: the payload bytes only, so re-signing keeps the identity
#[derive(Debug, Clone, Copy)]
pub enum HashTarget<'a> {
    Header(&'a Header),
    Transaction(&'a Transaction),
}

/// The single hashing capability used for headers, transactions and merkle
/// nodes. All variants share SHA-256 so their outputs are interchangeable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher;

impl Hasher {
    pub fn hash(target: HashTarget<'_>) -> Hash {
        match target {
            HashTarget::Header(header) => Hash::digest(&header.to_bytes()),
            HashTarget::Transaction(tx) => Hash::digest(tx.data()),
        }
    }
}
