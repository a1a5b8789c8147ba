// A transaction is an opaque signed payload moving from one key to another.
// There is no value accounting here: the ledger only checks that the sender
// really signed the payload.

use crate::core::{Hash, HashTarget, Hasher};
use crate::error::{LedgerError, Result};
use crate::wallet::{PrivateKey, PublicKey, Signature};

#[derive(Debug, Clone, PartialEq, Eq, bincode::Encode, bincode::Decode)]
pub struct Transaction {
    data: Vec<u8>,                  // Opaque payload; the only hashed part
    from: PublicKey,                // Sender, must be the signer
    receiver: PublicKey,            // Recipient
    signature: Option<Signature>,   // Sender's signature over `data`
}

impl Transaction {
    // Unsigned until `sign` is called
    pub fn new(from: PublicKey, receiver: PublicKey, data: Vec<u8>) -> Transaction {
        Transaction {
            data,
            from,
            receiver,
            signature: None,
        }
    }

    pub fn new_signed(from: &PrivateKey, receiver: PublicKey, data: Vec<u8>) -> Transaction {
        let mut tx = Transaction::new(from.public_key(), receiver, data);
        tx.sign(from);
        tx
    }

    /// Signs the payload, replacing any previous signature
    pub fn sign(&mut self, private_key: &PrivateKey) {
        self.signature = Some(private_key.sign(&self.data));
    }

    pub fn verify(&self) -> Result<()> {
        let signature = self.signature.as_ref().ok_or(LedgerError::MissingSignature)?;

        if !signature.verify(&self.from, &self.data) {
            return Err(LedgerError::InvalidSignature);
        }

        Ok(())
    }

    /// Payload hash; identical payloads share one identity regardless of signer
    pub fn hash(&self) -> Hash {
        Hasher::hash(HashTarget::Transaction(self))
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    pub fn from(&self) -> &PublicKey {
        &self.from
    }

    pub fn receiver(&self) -> &PublicKey {
        &self.receiver
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}
