// In-memory ledger: a contiguous list of headers indexed by height.
// Only headers are kept once a block is accepted; transaction bodies are the
// producer's business.

use crate::core::{Block, BlockValidator, ChainState, Hash, Header, Validator};
use crate::error::{LedgerError, Result};
use log::{info, warn};
use serde::Serialize;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Fact emitted for every appended header, for whoever wires up logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockAdded {
    pub height: u32,
    pub header_hash: Hash,
    pub transaction_count: usize,
}

pub struct Blockchain<V: Validator = BlockValidator> {
    // Reads take the shared lock; only the append in add_block takes it exclusively
    headers: RwLock<Vec<Header>>,
    validator: V,
}

impl Blockchain<BlockValidator> {
    pub fn new(genesis: Block) -> Result<Blockchain> {
        Self::with_validator(genesis, BlockValidator)
    }
}

impl<V: Validator> Blockchain<V> {
    /// Bootstraps the ledger. Genesis skips validation but must sit at height 0.
    pub fn with_validator(genesis: Block, validator: V) -> Result<Blockchain<V>> {
        if genesis.height() != 0 {
            return Err(LedgerError::InvalidGenesisHeight(genesis.height()));
        }

        info!(
            "Genesis block {} with {} transactions",
            genesis.hash(),
            genesis.transaction_count()
        );

        Ok(Blockchain {
            headers: RwLock::new(vec![*genesis.header()]),
            validator,
        })
    }

    /// Validates `block` and appends its header.
    ///
    /// On error the chain is unchanged. Concurrent producers are safe: the
    /// height slot is re-checked under the write lock before the append, so
    /// of two blocks racing for one height exactly one wins.
    pub fn add_block(&self, block: &Block) -> Result<BlockAdded> {
        if let Err(e) = self.validator.validate_block(block, self) {
            warn!("Rejected block at height {}: {e}", block.height());
            return Err(e);
        }

        let height = block.height();
        {
            let mut headers = self.write_headers();
            let next = headers.len() as u32;
            if height < next {
                warn!("Block at height {height} lost the race for its slot");
                return Err(LedgerError::HeightOccupied(height));
            }
            if height > next {
                return Err(LedgerError::HeightTooHigh {
                    height,
                    tip: next.saturating_sub(1),
                });
            }
            headers.push(*block.header());
        }

        let event = BlockAdded {
            height,
            header_hash: block.hash(),
            transaction_count: block.transaction_count(),
        };
        info!(
            "Added block at height {} hash {} with {} transactions",
            event.height, event.header_hash, event.transaction_count
        );

        Ok(event)
    }

    pub fn get_header_by_height(&self, height: u32) -> Result<Header> {
        let headers = self.read_headers();
        headers
            .get(height as usize)
            .copied()
            .ok_or(LedgerError::HeightOutOfRange {
                height,
                tip: Self::tip_height(&headers),
            })
    }

    /// Number of headers minus one; a genesis-only chain has height 0
    pub fn height(&self) -> u32 {
        Self::tip_height(&self.read_headers())
    }

    pub fn has_block(&self, height: u32) -> bool {
        height <= self.height()
    }

    pub fn tip(&self) -> Header {
        let headers = self.read_headers();
        // Never empty: the genesis header is inserted at construction
        headers[headers.len() - 1]
    }

    pub fn tip_hash(&self) -> Hash {
        self.tip().hash()
    }

    fn tip_height(headers: &[Header]) -> u32 {
        headers.len().saturating_sub(1) as u32
    }

    // A panicking holder cannot leave the list half-written (push is the only
    // mutation), so a poisoned lock is still safe to use.
    fn read_headers(&self) -> RwLockReadGuard<'_, Vec<Header>> {
        self.headers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_headers(&self) -> RwLockWriteGuard<'_, Vec<Header>> {
        self.headers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Validator> ChainState for Blockchain<V> {
    fn height(&self) -> u32 {
        Blockchain::height(self)
    }

    fn get_header_by_height(&self, height: u32) -> Result<Header> {
        Blockchain::get_header_by_height(self, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testnet::{
        new_blockchain_with_genesis, new_signed_block, new_tx_with_signature, prev_block_hash,
    };
    use crate::wallet::PrivateKey;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_blockchain_starts_at_height_zero() {
        let chain = new_blockchain_with_genesis();

        assert_eq!(chain.height(), 0);
        assert!(chain.has_block(0));
        assert!(!chain.has_block(1));
    }

    #[test]
    fn test_genesis_must_be_height_zero() {
        let validator = PrivateKey::generate().unwrap();
        let block = new_signed_block(&validator, vec![], 3, Hash::ZERO);

        assert!(matches!(
            Blockchain::new(block),
            Err(LedgerError::InvalidGenesisHeight(3))
        ));
    }

    #[test]
    fn test_add_block_emits_event() {
        let chain = new_blockchain_with_genesis();
        let validator = PrivateKey::generate().unwrap();
        let block = new_signed_block(
            &validator,
            vec![new_tx_with_signature(b"a"), new_tx_with_signature(b"b")],
            1,
            prev_block_hash(&chain, 1),
        );

        let event = chain.add_block(&block).unwrap();

        assert_eq!(
            event,
            BlockAdded {
                height: 1,
                header_hash: block.hash(),
                transaction_count: 2,
            }
        );
        assert_eq!(chain.height(), 1);
        assert_eq!(chain.get_header_by_height(1).unwrap(), *block.header());
        assert_eq!(chain.tip_hash(), block.hash());
    }

    #[test]
    fn test_get_header_past_tip_is_out_of_range() {
        let chain = new_blockchain_with_genesis();

        assert!(matches!(
            chain.get_header_by_height(1),
            Err(LedgerError::HeightOutOfRange { height: 1, tip: 0 })
        ));
    }

    #[test]
    fn test_rejected_block_leaves_chain_unchanged() {
        let chain = new_blockchain_with_genesis();
        let tip_before = chain.tip();
        let validator = PrivateKey::generate().unwrap();
        let block = new_signed_block(&validator, vec![], 1, Hash::ZERO);

        assert!(matches!(
            chain.add_block(&block),
            Err(LedgerError::PrevHashMismatch { .. })
        ));
        assert_eq!(chain.height(), 0);
        assert_eq!(chain.tip(), tip_before);
    }

    #[test]
    fn test_custom_validator_is_used() {
        struct RejectAll;

        impl Validator for RejectAll {
            fn validate_block(&self, _block: &Block, _chain: &dyn ChainState) -> Result<()> {
                Err(LedgerError::InvalidSignature)
            }
        }

        let validator = PrivateKey::generate().unwrap();
        let genesis = new_signed_block(&validator, vec![], 0, Hash::ZERO);
        let chain = Blockchain::with_validator(genesis, RejectAll).unwrap();
        let block = new_signed_block(&validator, vec![], 1, chain.tip_hash());

        assert!(matches!(
            chain.add_block(&block),
            Err(LedgerError::InvalidSignature)
        ));
        assert_eq!(chain.height(), 0);
    }

    #[test]
    fn test_concurrent_producers_for_same_height() {
        let chain = Arc::new(new_blockchain_with_genesis());
        let parent = chain.tip_hash();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let chain = Arc::clone(&chain);
                thread::spawn(move || {
                    let validator = PrivateKey::generate().unwrap();
                    let block = new_signed_block(
                        &validator,
                        vec![new_tx_with_signature(format!("producer {i}").as_bytes())],
                        1,
                        parent,
                    );
                    chain.add_block(&block)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let accepted = results.iter().filter(|r| r.is_ok()).count();

        assert_eq!(accepted, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, LedgerError::HeightOccupied(1))));
        assert_eq!(chain.height(), 1);
    }

    #[test]
    fn test_concurrent_readers() {
        let chain = Arc::new(new_blockchain_with_genesis());
        let validator = PrivateKey::generate().unwrap();

        for height in 1..=5 {
            let block = new_signed_block(&validator, vec![], height, chain.tip_hash());
            chain.add_block(&block).unwrap();
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let chain = Arc::clone(&chain);
                thread::spawn(move || {
                    for height in 1..=5 {
                        let header = chain.get_header_by_height(height).unwrap();
                        let parent = chain.get_header_by_height(height - 1).unwrap();
                        assert_eq!(header.prev_block_hash, parent.hash());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
