use crate::error::{LedgerError, Result};
use crate::utils::{ripemd160_digest, sha256_digest};
use crate::wallet::PublicKey;
use data_encoding::HEXLOWER;
use std::fmt;

pub const ADDRESS_LEN: usize = 20;

/// Short account identifier: RIPEMD-160 over SHA-256 of the public key.
///
/// Display only; never part of a signed or hashed preimage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bincode::Encode, bincode::Decode)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub fn from_public_key(public_key: &PublicKey) -> Address {
        let pub_key_sha256 = sha256_digest(public_key.as_bytes());
        Address(ripemd160_digest(&pub_key_sha256))
    }

    pub fn from_hex(value: &str) -> Result<Address> {
        let bytes = HEXLOWER
            .decode(value.as_bytes())
            .map_err(|e| LedgerError::Serialization(format!("Invalid address hex: {e}")))?;
        let address: [u8; ADDRESS_LEN] = bytes.as_slice().try_into().map_err(|_| {
            LedgerError::Serialization(format!(
                "Address must be {ADDRESS_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Address(address))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        HEXLOWER.encode(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
