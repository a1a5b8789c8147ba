//! Utility functions and helpers
//!
//! Digest functions, timestamps and the bincode transport encoding.

pub mod crypto;
pub mod serialization;

pub use crypto::{current_timestamp, ripemd160_digest, sha256_digest};

pub use serialization::{deserialize, serialize};
