use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A single write in an atomic batch.
#[derive(Debug, Clone)]
pub enum Mutation {
    Put(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

/// The key-value store C8's Balloon coordinator and the Raft-backed FSM
/// sit on top of. Deliberately narrow: this project builds a caller for
/// this trait, not a general-purpose storage engine.
pub trait Store: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Apply every mutation in `batch` as a single atomic unit. A
    /// partial application must never be observable by a concurrent
    /// `get`/`range`.
    fn mutate(&self, batch: Vec<Mutation>) -> Result<()>;

    /// All entries whose key starts with `prefix`, in key order.
    fn range(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// A consistent, point-in-time view for long-running readers (audit
    /// path construction, Raft snapshot export) that must not observe
    /// concurrent mutations.
    fn snapshot(&self) -> Result<Box<dyn StoreSnapshot>>;
}

pub trait StoreSnapshot: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
    fn range(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;
}
