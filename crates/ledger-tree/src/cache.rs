use std::collections::HashMap;
use std::sync::RwLock;

use ledger_crypto::Digest;

use crate::position::Position;

/// Read access to cached node digests. `ledger-storage`'s KV store sits
/// behind implementations of this trait; the tree code never talks to
/// storage directly.
pub trait Cache<P: Position> {
    fn get(&self, pos: &P) -> Option<Digest>;
}

/// A mutable side-table used by `CollectMutationsVisitor` to batch up
/// writes during an insert, and by tests as a throwaway cache.
#[derive(Default)]
pub struct InMemoryCache<P: Position> {
    entries: RwLock<HashMap<P, Digest>>,
}

impl<P: Position> InMemoryCache<P> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn put(&self, pos: P, digest: Digest) {
        self.entries.write().unwrap().insert(pos, digest);
    }

    pub fn put_all(&self, mutations: impl IntoIterator<Item = (P, Digest)>) {
        let mut guard = self.entries.write().unwrap();
        for (pos, digest) in mutations {
            guard.insert(pos, digest);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: Position> Cache<P> for InMemoryCache<P> {
    fn get(&self, pos: &P) -> Option<Digest> {
        self.entries.read().unwrap().get(pos).cloned()
    }
}

/// A cache double for tests: always returns the same digest, regardless
/// of position. Good enough to exercise pruning shape without wiring up
/// real frozen-subtree digests.
pub struct FakeCache(pub Digest);

impl<P: Position> Cache<P> for FakeCache {
    fn get(&self, _pos: &P) -> Option<Digest> {
        Some(self.0.clone())
    }
}
