//! Test utilities for ledger testing

use crate::core::{Block, Blockchain, Hash, Header, Transaction};
use crate::utils::current_timestamp;
use crate::wallet::PrivateKey;

pub const TEST_BLOCK_VERSION: u32 = 1;

/// Header at `height` with the current time and an unset merkle root
pub fn example_header(height: u32, prev_block_hash: Hash) -> Header {
    let timestamp = current_timestamp().expect("system clock should be after the epoch");
    Header::new(TEST_BLOCK_VERSION, prev_block_hash, height, timestamp)
}

/// Transaction between two fresh keys, signed by the sender
pub fn new_tx_with_signature(data: &[u8]) -> Transaction {
    let from = PrivateKey::generate().expect("entropy should be available in tests");
    let receiver = PrivateKey::generate().expect("entropy should be available in tests");
    Transaction::new_signed(&from, receiver.public_key(), data.to_vec())
}

pub fn new_signed_block(
    validator: &PrivateKey,
    transactions: Vec<Transaction>,
    height: u32,
    prev_block_hash: Hash,
) -> Block {
    let mut block = Block::new_block(example_header(height, prev_block_hash), transactions);
    block.sign(validator);
    block
}

/// Ledger holding a signed genesis block with one transaction
pub fn new_blockchain_with_genesis() -> Blockchain {
    let validator = PrivateKey::generate().expect("entropy should be available in tests");
    let genesis = new_signed_block(
        &validator,
        vec![new_tx_with_signature(b"Hello, World")],
        0,
        Hash::ZERO,
    );
    Blockchain::new(genesis).expect("genesis at height 0 is always accepted")
}

/// Hash of the header just below `height`
pub fn prev_block_hash(chain: &Blockchain, height: u32) -> Hash {
    chain
        .get_header_by_height(height - 1)
        .expect("predecessor header should exist")
        .hash()
}
