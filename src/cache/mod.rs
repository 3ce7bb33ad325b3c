//! Cache module for the persisted inventory snapshots
//!
//! This module provides a store for the two cache artifacts written between
//! runs: the grouped inventory and the address index. Freshness is judged
//! from file modification time plus a configured maximum age, so a run that
//! finds fresh artifacts never touches the network.

mod store;

pub use store::{CacheError, CacheStore};
