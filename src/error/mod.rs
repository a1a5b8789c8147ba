//! Error handling for the ledger
//!
//! Every fallible operation in the crate returns [`Result`], carrying one
//! specific [`LedgerError`] kind. Nothing in the core aborts the process.

use crate::core::Hash;
use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error kinds for key handling, block verification and chain sequencing
#[derive(Debug, Clone)]
pub enum LedgerError {
    /// The OS entropy source could not be read
    RandomSource(String),
    /// Other cryptographic failures (rejected key material)
    Crypto(String),
    /// System clock before the epoch or out of timestamp range
    Clock(String),
    /// A worker thread panicked before returning its result
    ThreadPanicked(String),
    /// A hash was decoded from the wrong number of bytes
    InvalidHashLength(usize),
    /// A signature was decoded from the wrong number of bytes
    InvalidSignatureLength(usize),
    /// A public key was decoded from the wrong number of bytes
    InvalidPublicKeyLength(usize),
    /// A header was decoded from the wrong number of bytes
    InvalidHeaderLength(usize),
    /// Block or transaction carries no signature
    MissingSignature,
    /// Signature does not verify against the signed bytes and key
    InvalidSignature,
    /// A contained transaction failed its own verification
    InvalidTransaction {
        index: usize,
        reason: Box<LedgerError>,
    },
    /// Header merkle root differs from the root of the transaction list
    MerkleMismatch { expected: Hash, actual: Hash },
    /// A header already exists at this height
    HeightOccupied(u32),
    /// Block would leave a gap after the current tip
    HeightTooHigh { height: u32, tip: u32 },
    /// No header exists at the expected predecessor height
    MissingPredecessor(u32),
    /// Block does not link to the hash of its predecessor
    PrevHashMismatch { expected: Hash, actual: Hash },
    /// Query past the current tip
    HeightOutOfRange { height: u32, tip: u32 },
    /// Index past the end of an ordered container
    IndexOutOfRange { index: usize, len: usize },
    /// Genesis block must sit at height 0
    InvalidGenesisHeight(u32),
    /// Configuration errors
    Config(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::RandomSource(msg) => write!(f, "Random source error: {msg}"),
            LedgerError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
            LedgerError::Clock(msg) => write!(f, "Clock error: {msg}"),
            LedgerError::ThreadPanicked(name) => write!(f, "Thread panicked: {name}"),
            LedgerError::InvalidHashLength(len) => {
                write!(f, "Invalid hash length: expected 32 bytes, got {len}")
            }
            LedgerError::InvalidSignatureLength(len) => {
                write!(f, "Invalid signature length: expected 64 bytes, got {len}")
            }
            LedgerError::InvalidPublicKeyLength(len) => {
                write!(f, "Invalid public key length: expected 32 bytes, got {len}")
            }
            LedgerError::InvalidHeaderLength(len) => {
                write!(f, "Invalid header length: expected 80 bytes, got {len}")
            }
            LedgerError::MissingSignature => write!(f, "Missing signature"),
            LedgerError::InvalidSignature => write!(f, "Invalid signature"),
            LedgerError::InvalidTransaction { index, reason } => {
                write!(f, "Invalid transaction at index {index}: {reason}")
            }
            LedgerError::MerkleMismatch { expected, actual } => {
                write!(f, "Merkle root mismatch: header has {expected}, transactions give {actual}")
            }
            LedgerError::HeightOccupied(height) => {
                write!(f, "Chain already contains a block at height {height}")
            }
            LedgerError::HeightTooHigh { height, tip } => {
                write!(f, "Block height {height} is too high (current tip {tip})")
            }
            LedgerError::MissingPredecessor(height) => {
                write!(f, "No predecessor header for block at height {height}")
            }
            LedgerError::PrevHashMismatch { expected, actual } => {
                write!(f, "Previous hash mismatch: expected {expected}, block has {actual}")
            }
            LedgerError::HeightOutOfRange { height, tip } => {
                write!(f, "Height {height} is greater than the chain height {tip}")
            }
            LedgerError::IndexOutOfRange { index, len } => {
                write!(f, "Index {index} out of range for length {len}")
            }
            LedgerError::InvalidGenesisHeight(height) => {
                write!(f, "Genesis block must have height 0, got {height}")
            }
            LedgerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LedgerError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            LedgerError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}

impl From<bincode::error::EncodeError> for LedgerError {
    fn from(err: bincode::error::EncodeError) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for LedgerError {
    fn from(err: bincode::error::DecodeError) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}
