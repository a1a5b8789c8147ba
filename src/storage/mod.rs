//! Transaction staging
//!
//! The memory pool for transactions waiting to be sealed into a block, and
//! the ordered container backing it.

pub mod memory_pool;
pub mod ordered_list;

pub use memory_pool::{Admission, MemoryPool, TxMap};
pub use ordered_list::{Identified, OrderedList};
