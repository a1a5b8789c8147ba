use crate::config::{Config, GLOBAL_CONFIG};
use crate::core::{Hash, Transaction};
use crate::storage::{Identified, OrderedList};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Ordered slot pairing a transaction with its precomputed payload hash
#[derive(Debug, Clone)]
struct PoolEntry {
    hash: Hash,
    tx: Arc<Transaction>,
}

impl Identified for PoolEntry {
    type Id = Hash;

    fn id(&self) -> Hash {
        self.hash
    }
}

#[derive(Debug, Default)]
struct TxMapInner {
    by_hash: HashMap<Hash, Arc<Transaction>>,
    order: OrderedList<PoolEntry>,
}

impl TxMapInner {
    fn insert(&mut self, hash: Hash, tx: Arc<Transaction>) -> bool {
        if self.by_hash.contains_key(&hash) {
            return false;
        }
        self.by_hash.insert(hash, Arc::clone(&tx));
        self.order.push(PoolEntry { hash, tx });
        true
    }

    fn remove(&mut self, hash: &Hash) -> Option<Arc<Transaction>> {
        let tx = self.by_hash.remove(hash)?;
        self.order.remove(hash);
        Some(tx)
    }
}

/// Outcome of a bounded insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Inserted; carries the hash of the entry evicted to make room, if any
    Added { evicted: Option<Hash> },
    /// Same payload hash already present; nothing changed
    Duplicate,
}

/// ( K -> payload hash, V -> Transaction ) with insertion order.
///
/// Hash-keyed index for O(1) membership plus an ordered list for stable
/// iteration, both behind one lock.
#[derive(Debug, Default)]
pub struct TxMap {
    inner: RwLock<TxMapInner>,
}

impl TxMap {
    pub fn new() -> TxMap {
        TxMap::default()
    }

    /// Oldest entry, or `None` when empty
    pub fn first(&self) -> Option<Arc<Transaction>> {
        match self.inner.read() {
            Ok(inner) => inner.order.first().map(|entry| Arc::clone(&entry.tx)),
            Err(_) => {
                log::error!("Failed to acquire read lock on tx map");
                None
            }
        }
    }

    pub fn get(&self, hash: &Hash) -> Option<Arc<Transaction>> {
        match self.inner.read() {
            Ok(inner) => inner.by_hash.get(hash).cloned(),
            Err(_) => {
                log::error!("Failed to acquire read lock on tx map");
                None
            }
        }
    }

    /// Inserts unless the payload hash is already present
    pub fn add(&self, tx: Arc<Transaction>) -> bool {
        let hash = tx.hash();
        match self.inner.write() {
            Ok(mut inner) => inner.insert(hash, tx),
            Err(_) => {
                log::error!("Failed to acquire write lock on tx map");
                false
            }
        }
    }

    /// Duplicate check, oldest-first eviction and insert as one locked step
    pub fn add_bounded(&self, tx: Arc<Transaction>, capacity: usize) -> Admission {
        let hash = tx.hash();
        match self.inner.write() {
            Ok(mut inner) => {
                if inner.by_hash.contains_key(&hash) {
                    return Admission::Duplicate;
                }

                let mut evicted = None;
                if inner.by_hash.len() >= capacity.max(1) {
                    if let Some(oldest) = inner.order.first().map(|entry| entry.hash) {
                        inner.remove(&oldest);
                        evicted = Some(oldest);
                    }
                }

                inner.insert(hash, tx);
                Admission::Added { evicted }
            }
            Err(_) => {
                log::error!("Failed to acquire write lock on tx map");
                Admission::Duplicate
            }
        }
    }

    pub fn remove(&self, hash: &Hash) -> Option<Arc<Transaction>> {
        match self.inner.write() {
            Ok(mut inner) => inner.remove(hash),
            Err(_) => {
                log::error!("Failed to acquire write lock on tx map");
                None
            }
        }
    }

    pub fn count(&self) -> usize {
        match self.inner.read() {
            Ok(inner) => inner.by_hash.len(),
            Err(_) => {
                log::error!("Failed to acquire read lock on tx map");
                0
            }
        }
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        match self.inner.read() {
            Ok(inner) => inner.by_hash.contains_key(hash),
            Err(_) => {
                log::error!("Failed to acquire read lock on tx map");
                false
            }
        }
    }

    pub fn clear(&self) {
        match self.inner.write() {
            Ok(mut inner) => {
                inner.by_hash.clear();
                inner.order.clear();
            }
            Err(_) => {
                log::error!("Failed to acquire write lock on tx map");
            }
        }
    }

    /// Copy of the entries in insertion order
    pub fn snapshot(&self) -> Vec<Arc<Transaction>> {
        match self.inner.read() {
            Ok(inner) => inner.order.iter().map(|entry| Arc::clone(&entry.tx)).collect(),
            Err(_) => {
                log::error!("Failed to acquire read lock on tx map");
                Vec::new()
            }
        }
    }

    /// Snapshot and clear under a single write lock
    pub fn drain(&self) -> Vec<Arc<Transaction>> {
        match self.inner.write() {
            Ok(mut inner) => {
                inner.by_hash.clear();
                let drained = inner.order.iter().map(|entry| Arc::clone(&entry.tx)).collect();
                inner.order.clear();
                drained
            }
            Err(_) => {
                log::error!("Failed to acquire write lock on tx map");
                Vec::new()
            }
        }
    }
}

/// Staging area for transactions waiting to be sealed into a block.
///
/// `all` remembers every admitted transaction up to `max_size`, evicting the
/// oldest first. `pending` holds what has not been drained yet and is only
/// emptied explicitly. The two maps lock independently.
pub struct MemoryPool {
    all: TxMap,
    pending: TxMap,
    max_size: usize,
}

impl Default for MemoryPool {
    fn default() -> Self {
        Self::from_config(&GLOBAL_CONFIG)
    }
}

impl MemoryPool {
    pub fn new(max_size: usize) -> MemoryPool {
        MemoryPool {
            all: TxMap::new(),
            pending: TxMap::new(),
            max_size: max_size.max(1),
        }
    }

    pub fn from_config(config: &Config) -> MemoryPool {
        Self::new(config.mempool_max_size)
    }

    /// Admits `tx` into both maps. Returns false when its payload hash is
    /// already known, in which case neither map changes.
    pub fn add(&self, tx: Transaction) -> bool {
        let tx = Arc::new(tx);
        let hash = tx.hash();

        match self.all.add_bounded(Arc::clone(&tx), self.max_size) {
            Admission::Duplicate => {
                debug!("Ignoring duplicate transaction {hash}");
                false
            }
            Admission::Added { evicted } => {
                if let Some(evicted) = evicted {
                    debug!("Evicted oldest transaction {evicted} from memory pool");
                }
                self.pending.add(tx);
                debug!("Added transaction {hash} to memory pool");
                true
            }
        }
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.all.contains(hash)
    }

    pub fn get(&self, hash: &Hash) -> Option<Arc<Transaction>> {
        self.all.get(hash)
    }

    /// Pending transactions in insertion order, as a snapshot
    pub fn get_pending(&self) -> Vec<Arc<Transaction>> {
        self.pending.snapshot()
    }

    /// Takes the pending transactions and empties the pending map in one step
    pub fn drain_pending(&self) -> Vec<Arc<Transaction>> {
        self.pending.drain()
    }

    /// Empties `pending` only; `all` keeps its history
    pub fn clear_pending(&self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.count()
    }

    pub fn all_count(&self) -> usize {
        self.all.count()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}
