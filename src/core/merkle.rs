use crate::core::{Hash, Transaction};
use crate::error::{LedgerError, Result};

/// Merkle proof that one transaction is committed by a merkle root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    /// Payload hash of the transaction being proven
    pub leaf: Hash,
    /// Index of the transaction in the block
    pub index: usize,
    /// Sibling hashes from the leaf level up to just below the root
    pub path: Vec<ProofElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofElement {
    /// Sibling hash
    pub hash: Hash,
    /// Direction: true if sibling is on the right, false if on the left
    pub is_right: bool,
}

/// Merkle root over the payload hashes of `transactions`, in order.
///
/// Empty input gives [`Hash::ZERO`]. Odd levels pair their last hash with
/// itself.
pub fn compute_merkle_root(transactions: &[Transaction]) -> Hash {
    let leaves: Vec<Hash> = transactions.iter().map(Transaction::hash).collect();
    merkle_root_from_hashes(&leaves)
}

pub fn merkle_root_from_hashes(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return Hash::ZERO;
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level);
    }

    level[0]
}

/// SHA-256 over the 64-byte concatenation `left || right`
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut combined = [0u8; 64];
    combined[..32].copy_from_slice(left.as_bytes());
    combined[32..].copy_from_slice(right.as_bytes());
    Hash::digest(&combined)
}

fn next_level(level: &[Hash]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hash_pair(left, right)
        })
        .collect()
}

/// Build an inclusion proof for the transaction at `index`
pub fn generate_proof(transactions: &[Transaction], index: usize) -> Result<MerkleProof> {
    if index >= transactions.len() {
        return Err(LedgerError::IndexOutOfRange {
            index,
            len: transactions.len(),
        });
    }

    let mut level: Vec<Hash> = transactions.iter().map(Transaction::hash).collect();
    let leaf = level[index];
    let mut position = index;
    let mut path = Vec::new();

    while level.len() > 1 {
        let element = if position % 2 == 0 {
            // Missing right sibling means the node was paired with itself
            let sibling = level.get(position + 1).copied().unwrap_or(level[position]);
            ProofElement {
                hash: sibling,
                is_right: true,
            }
        } else {
            ProofElement {
                hash: level[position - 1],
                is_right: false,
            }
        };
        path.push(element);

        level = next_level(&level);
        position /= 2;
    }

    Ok(MerkleProof { leaf, index, path })
}

impl MerkleProof {
    pub fn verify(&self, merkle_root: &Hash) -> bool {
        let computed = self.path.iter().fold(self.leaf, |current, element| {
            if element.is_right {
                hash_pair(&current, &element.hash)
            } else {
                hash_pair(&element.hash, &current)
            }
        });

        computed == *merkle_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::PrivateKey;

    fn txs(payloads: &[&[u8]]) -> Vec<Transaction> {
        let key = PrivateKey::from_seed(&[1u8; 32]).unwrap();
        payloads
            .iter()
            .map(|p| Transaction::new_signed(&key, key.public_key(), p.to_vec()))
            .collect()
    }

    #[test]
    fn test_empty_input_gives_zero_hash() {
        assert_eq!(compute_merkle_root(&[]), Hash::ZERO);
        assert!(compute_merkle_root(&[]).is_unset());
    }

    #[test]
    fn test_single_transaction_root_is_its_leaf() {
        let list = txs(&[b"a"]);
        assert_eq!(compute_merkle_root(&list), Hash::digest(b"a"));
    }

    #[test]
    fn test_odd_count_duplicates_last_hash() {
        let list = txs(&[b"a", b"b", b"c"]);

        let ha = Hash::digest(b"a");
        let hb = Hash::digest(b"b");
        let hc = Hash::digest(b"c");
        let expected = hash_pair(&hash_pair(&ha, &hb), &hash_pair(&hc, &hc));

        assert_eq!(compute_merkle_root(&list), expected);
    }

    #[test]
    fn test_root_depends_on_order() {
        let forward = txs(&[b"a", b"b", b"c", b"d"]);
        let swapped = txs(&[b"b", b"a", b"c", b"d"]);

        assert_ne!(compute_merkle_root(&forward), compute_merkle_root(&swapped));
    }

    #[test]
    fn test_single_byte_change_changes_root() {
        let original = txs(&[b"Hello, World0", b"Hello, World1", b"Hello, World2"]);
        let altered = txs(&[b"Hello, World0", b"Hello, World1", b"Hello, World3"]);

        assert_ne!(compute_merkle_root(&original), compute_merkle_root(&altered));
    }

    #[test]
    fn test_root_is_deterministic() {
        let list = txs(&[b"x", b"y", b"z", b"w", b"v"]);
        assert_eq!(compute_merkle_root(&list), compute_merkle_root(&list.clone()));
    }

    #[test]
    fn test_proofs_verify_for_every_leaf() {
        let list = txs(&[b"0", b"1", b"2", b"3", b"4", b"5", b"6"]);
        let root = compute_merkle_root(&list);

        for index in 0..list.len() {
            let proof = generate_proof(&list, index).unwrap();
            assert_eq!(proof.leaf, list[index].hash());
            assert!(proof.verify(&root), "proof for leaf {index} failed");
        }
    }

    #[test]
    fn test_proof_rejects_other_root() {
        let list = txs(&[b"0", b"1", b"2"]);
        let proof = generate_proof(&list, 1).unwrap();

        assert!(!proof.verify(&Hash::digest(b"not the root")));
    }

    #[test]
    fn test_proof_index_out_of_range() {
        let list = txs(&[b"0"]);
        assert!(matches!(
            generate_proof(&list, 1),
            Err(LedgerError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }
}
