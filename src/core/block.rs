use crate::core::merkle::{self, MerkleProof};
use crate::core::{compute_merkle_root, Hash, HashTarget, Hasher, Transaction};
use crate::error::{LedgerError, Result};
use crate::utils::{current_timestamp, deserialize, serialize};
use crate::wallet::{PrivateKey, PublicKey, Signature};
use std::sync::OnceLock;

/// Encoded header size: version(4) + prev(32) + merkle(32) + timestamp(8) + height(4)
pub const HEADER_LEN: usize = 80;

/// Block metadata. Its byte form is both the signed message and the hash
/// preimage, so it must stay fixed-width and field-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, bincode::Encode, bincode::Decode)]
pub struct Header {
    pub version: u32,
    pub prev_block_hash: Hash,
    pub merkle_root: Hash,
    pub timestamp: i64,
    pub height: u32,
}

impl Header {
    /// Header with an unset merkle root; `Block::new_block` fills it in
    pub fn new(version: u32, prev_block_hash: Hash, height: u32, timestamp: i64) -> Header {
        Header {
            version,
            prev_block_hash,
            merkle_root: Hash::ZERO,
            timestamp,
            height,
        }
    }

    /// Canonical big-endian encoding:
    /// `version u32 | prev_block_hash [32] | merkle_root [32] | timestamp i64 | height u32`
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.version.to_be_bytes());
        out[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        out[36..68].copy_from_slice(self.merkle_root.as_bytes());
        out[68..76].copy_from_slice(&self.timestamp.to_be_bytes());
        out[76..80].copy_from_slice(&self.height.to_be_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Header> {
        let bytes: &[u8; HEADER_LEN] = bytes
            .try_into()
            .map_err(|_| LedgerError::InvalidHeaderLength(bytes.len()))?;

        let mut version = [0u8; 4];
        let mut timestamp = [0u8; 8];
        let mut height = [0u8; 4];
        version.copy_from_slice(&bytes[0..4]);
        timestamp.copy_from_slice(&bytes[68..76]);
        height.copy_from_slice(&bytes[76..80]);

        Ok(Header {
            version: u32::from_be_bytes(version),
            prev_block_hash: Hash::from_bytes(&bytes[4..36])?,
            merkle_root: Hash::from_bytes(&bytes[36..68])?,
            timestamp: i64::from_be_bytes(timestamp),
            height: u32::from_be_bytes(height),
        })
    }

    pub fn hash(&self) -> Hash {
        Hasher::hash(HashTarget::Header(self))
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    header: Header,
    transactions: Vec<Transaction>,
    validator: Option<PublicKey>, // Key of the signing validator
    signature: Option<Signature>, // Signature over header.to_bytes()
    header_hash: OnceLock<Hash>,  // Filled on first hash(); reset whenever the header changes
}

impl Block {
    /// Builds a block and commits `transactions` into the header's merkle root
    pub fn new_block(mut header: Header, transactions: Vec<Transaction>) -> Block {
        header.merkle_root = compute_merkle_root(&transactions);

        Block {
            header,
            transactions,
            validator: None,
            signature: None,
            header_hash: OnceLock::new(),
        }
    }

    pub fn generate_genesis_block(version: u32, transactions: Vec<Transaction>) -> Result<Block> {
        let header = Header::new(version, Hash::ZERO, 0, current_timestamp()?);
        Ok(Block::new_block(header, transactions))
    }

    /// Signs the header bytes, replacing any previous validator key and signature
    pub fn sign(&mut self, private_key: &PrivateKey) {
        self.signature = Some(private_key.sign(&self.header.to_bytes()));
        self.validator = Some(private_key.public_key());
    }

    /// Checks, in order: header signature, every transaction, merkle root.
    /// Stops at the first failure.
    pub fn verify(&self) -> Result<()> {
        let (validator, signature) = match (&self.validator, &self.signature) {
            (Some(validator), Some(signature)) => (validator, signature),
            _ => return Err(LedgerError::MissingSignature),
        };

        if !signature.verify(validator, &self.header.to_bytes()) {
            return Err(LedgerError::InvalidSignature);
        }

        for (index, tx) in self.transactions.iter().enumerate() {
            tx.verify().map_err(|reason| LedgerError::InvalidTransaction {
                index,
                reason: Box::new(reason),
            })?;
        }

        let actual = compute_merkle_root(&self.transactions);
        if actual != self.header.merkle_root {
            return Err(LedgerError::MerkleMismatch {
                expected: self.header.merkle_root,
                actual,
            });
        }

        Ok(())
    }

    pub fn hash(&self) -> Hash {
        *self.header_hash.get_or_init(|| self.header.hash())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    /// Mutable access to the body. The header is left untouched, so a changed
    /// list fails `verify` until `refresh_merkle_root` and a new `sign`.
    pub fn transactions_mut(&mut self) -> &mut Vec<Transaction> {
        &mut self.transactions
    }

    /// Recommits the current transaction list into the header
    pub fn refresh_merkle_root(&mut self) {
        self.header.merkle_root = compute_merkle_root(&self.transactions);
        self.header_hash = OnceLock::new();
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn validator_public_key(&self) -> Option<&PublicKey> {
        self.validator.as_ref()
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    pub fn generate_merkle_proof(&self, transaction_index: usize) -> Result<MerkleProof> {
        merkle::generate_proof(&self.transactions, transaction_index)
    }

    pub fn verify_merkle_proof(&self, proof: &MerkleProof) -> bool {
        proof.verify(&self.header.merkle_root)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        serialize(self)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Block> {
        deserialize::<Block>(bytes)
    }
}

// Hand-written so the cached hash never goes over the wire
impl bincode::Encode for Block {
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> std::result::Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.header, encoder)?;
        bincode::Encode::encode(&self.transactions, encoder)?;
        bincode::Encode::encode(&self.validator, encoder)?;
        bincode::Encode::encode(&self.signature, encoder)
    }
}

impl<Context> bincode::Decode<Context> for Block {
    fn decode<D: bincode::de::Decoder<Context = Context>>(
        decoder: &mut D,
    ) -> std::result::Result<Self, bincode::error::DecodeError> {
        Ok(Block {
            header: bincode::Decode::decode(decoder)?,
            transactions: bincode::Decode::decode(decoder)?,
            validator: bincode::Decode::decode(decoder)?,
            signature: bincode::Decode::decode(decoder)?,
            header_hash: OnceLock::new(),
        })
    }
}
