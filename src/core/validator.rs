//! Block acceptance rules.
//!
//! A [`Validator`] decides whether a candidate block may extend the chain.
//! It only reads chain state through [`ChainState`] and never mutates it.

use crate::core::{Block, Header};
use crate::error::{LedgerError, Result};

/// Read access to the header sequence a validator checks against
pub trait ChainState {
    /// Index of the current tip (`len - 1`)
    fn height(&self) -> u32;

    /// Header at `height`, or `HeightOutOfRange` past the tip
    fn get_header_by_height(&self, height: u32) -> Result<Header>;
}

/// Trait for validating blocks before they are added to the chain.
///
/// Implementations must be thread-safe for concurrent validation.
pub trait Validator: Send + Sync {
    fn validate_block(&self, block: &Block, chain: &dyn ChainState) -> Result<()>;
}

/// Default validator for a single-signer chain.
///
/// Checks, stopping at the first failure:
/// 1. no header exists at the block's height
/// 2. the block is at most one above the tip
/// 3. the predecessor header exists
/// 4. `prev_block_hash` equals the predecessor's header hash
/// 5. the block itself verifies (signature, transactions, merkle root)
///
/// Genesis never goes through here.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockValidator;

impl Validator for BlockValidator {
    fn validate_block(&self, block: &Block, chain: &dyn ChainState) -> Result<()> {
        let height = block.height();

        if chain.get_header_by_height(height).is_ok() {
            return Err(LedgerError::HeightOccupied(height));
        }

        let tip = chain.height();
        if height > tip.saturating_add(1) {
            return Err(LedgerError::HeightTooHigh { height, tip });
        }

        let prev_header = height
            .checked_sub(1)
            .and_then(|prev| chain.get_header_by_height(prev).ok())
            .ok_or(LedgerError::MissingPredecessor(height))?;

        let expected = prev_header.hash();
        if expected != block.header().prev_block_hash {
            return Err(LedgerError::PrevHashMismatch {
                expected,
                actual: block.header().prev_block_hash,
            });
        }

        block.verify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Hash;
    use crate::testnet::{example_header, new_signed_block, new_tx_with_signature};
    use crate::wallet::PrivateKey;

    /// Plain header list standing in for a ledger
    struct Headers(Vec<Header>);

    impl ChainState for Headers {
        fn height(&self) -> u32 {
            self.0.len().saturating_sub(1) as u32
        }

        fn get_header_by_height(&self, height: u32) -> Result<Header> {
            self.0
                .get(height as usize)
                .copied()
                .ok_or(LedgerError::HeightOutOfRange {
                    height,
                    tip: self.height(),
                })
        }
    }

    fn genesis_state() -> Headers {
        let mut genesis = example_header(0, Hash::ZERO);
        genesis.merkle_root = Hash::digest(b"genesis");
        Headers(vec![genesis])
    }

    #[test]
    fn test_accepts_next_block() {
        let state = genesis_state();
        let validator = PrivateKey::generate().unwrap();
        let block = new_signed_block(
            &validator,
            vec![new_tx_with_signature(b"tx")],
            1,
            state.0[0].hash(),
        );

        assert!(BlockValidator.validate_block(&block, &state).is_ok());
    }

    #[test]
    fn test_rejects_occupied_height() {
        let state = genesis_state();
        let validator = PrivateKey::generate().unwrap();
        let block = new_signed_block(&validator, vec![], 0, Hash::ZERO);

        assert!(matches!(
            BlockValidator.validate_block(&block, &state),
            Err(LedgerError::HeightOccupied(0))
        ));
    }

    #[test]
    fn test_rejects_gap() {
        let state = genesis_state();
        let validator = PrivateKey::generate().unwrap();
        let block = new_signed_block(&validator, vec![], 2, state.0[0].hash());

        assert!(matches!(
            BlockValidator.validate_block(&block, &state),
            Err(LedgerError::HeightTooHigh { height: 2, tip: 0 })
        ));
    }

    #[test]
    fn test_rejects_wrong_parent() {
        let state = genesis_state();
        let validator = PrivateKey::generate().unwrap();
        let block = new_signed_block(&validator, vec![], 1, Hash::ZERO);

        match BlockValidator.validate_block(&block, &state) {
            Err(LedgerError::PrevHashMismatch { expected, actual }) => {
                assert_eq!(expected, state.0[0].hash());
                assert_eq!(actual, Hash::ZERO);
            }
            other => panic!("expected PrevHashMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_missing_predecessor_on_empty_state() {
        let state = Headers(vec![]);
        let validator = PrivateKey::generate().unwrap();
        let block = new_signed_block(&validator, vec![], 0, Hash::ZERO);

        assert!(matches!(
            BlockValidator.validate_block(&block, &state),
            Err(LedgerError::MissingPredecessor(0))
        ));
    }

    #[test]
    fn test_propagates_block_verification_failure() {
        let state = genesis_state();
        let mut block = crate::core::Block::new_block(
            example_header(1, state.0[0].hash()),
            vec![new_tx_with_signature(b"tx")],
        );

        assert!(matches!(
            BlockValidator.validate_block(&block, &state),
            Err(LedgerError::MissingSignature)
        ));

        let validator = PrivateKey::generate().unwrap();
        block.sign(&validator);
        block.transactions_mut().push(new_tx_with_signature(b"smuggled"));

        assert!(matches!(
            BlockValidator.validate_block(&block, &state),
            Err(LedgerError::MerkleMismatch { .. })
        ));
    }
}
