use crate::error::{LedgerError, Result};
use crate::wallet::Address;
use data_encoding::HEXLOWER;
use ring::rand::{SecureRandom, SystemRandom};
use ring::signature::{Ed25519KeyPair, KeyPair, UnparsedPublicKey, ED25519};
use std::fmt;
use zeroize::Zeroizing;

pub const SEED_LEN: usize = 32;
pub const PUBLIC_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

/// Ed25519 signing key derived from a 32-byte seed.
///
/// The seed is wiped from memory when the key is dropped. There is no
/// serialization for this type: private keys never leave their holder.
pub struct PrivateKey {
    seed: Zeroizing<[u8; SEED_LEN]>,
    key_pair: Ed25519KeyPair,
}

impl PrivateKey {
    /// Generates a fresh key from the system CSPRNG
    pub fn generate() -> Result<PrivateKey> {
        let rng = SystemRandom::new();
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        rng.fill(&mut seed[..])
            .map_err(|e| LedgerError::RandomSource(format!("Failed to read entropy: {e}")))?;
        Self::from_seed(&seed[..])
    }

    pub fn from_seed(seed: &[u8]) -> Result<PrivateKey> {
        if seed.len() != SEED_LEN {
            return Err(LedgerError::Crypto(format!(
                "Seed must be {SEED_LEN} bytes, got {}",
                seed.len()
            )));
        }

        let key_pair = Ed25519KeyPair::from_seed_unchecked(seed)
            .map_err(|e| LedgerError::Crypto(format!("Failed to derive Ed25519 key: {e}")))?;

        let mut stored = Zeroizing::new([0u8; SEED_LEN]);
        stored.copy_from_slice(seed);

        Ok(PrivateKey {
            seed: stored,
            key_pair,
        })
    }

    pub fn seed(&self) -> &[u8] {
        &self.seed[..]
    }

    pub fn public_key(&self) -> PublicKey {
        let mut key = [0u8; PUBLIC_KEY_LEN];
        key.copy_from_slice(self.key_pair.public_key().as_ref());
        PublicKey(key)
    }

    /// Ed25519 signing is deterministic: the same key and message always
    /// produce the same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let mut value = [0u8; SIGNATURE_LEN];
        value.copy_from_slice(self.key_pair.sign(message).as_ref());
        Signature(value)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bincode::Encode, bincode::Decode)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey> {
        let key: [u8; PUBLIC_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| LedgerError::InvalidPublicKeyLength(bytes.len()))?;
        Ok(PublicKey(key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(self)
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        UnparsedPublicKey::new(&ED25519, &self.0)
            .verify(message, &signature.0)
            .is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HEXLOWER.encode(&self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bincode::Encode, bincode::Decode)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature> {
        let value: [u8; SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| LedgerError::InvalidSignatureLength(bytes.len()))?;
        Ok(Signature(value))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn verify(&self, public_key: &PublicKey, message: &[u8]) -> bool {
        public_key.verify(message, self)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = LedgerError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Signature::from_bytes(bytes)
    }
}

pub fn generate_keypair() -> Result<(PrivateKey, PublicKey)> {
    let private_key = PrivateKey::generate()?;
    let public_key = private_key.public_key();
    Ok((private_key, public_key))
}

pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Signature {
    private_key.sign(message)
}

pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature)
}
