//! Key-value store abstraction backing the history and hyper tree caches,
//! the event log, and Raft/FSM metadata.
//!
//! [`Store`] is the narrow interface the rest of the project depends on;
//! [`MemoryStore`] and [`SledStore`] are the two implementations shipped
//! here. [`tree_cache::StoreCache`] adapts either one into an
//! `ledger_tree::Cache` for a specific tree's position type.

pub mod keys;
pub mod memory;
pub mod sled_store;
pub mod store;
pub mod tree_cache;

pub use memory::MemoryStore;
pub use sled_store::SledStore;
pub use store::{Mutation, Store, StoreError, StoreSnapshot};
pub use tree_cache::{HyperStoreCache, StoreCache};
