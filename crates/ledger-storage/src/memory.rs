use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::store::{Mutation, Result, Store, StoreSnapshot};

/// An in-memory, `BTreeMap`-backed store: a `RwLock`-guarded map keyed by
/// byte strings, atomic under one lock for the whole batch. Used for
/// tests and single-process demos where durability doesn't matter.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn mutate(&self, batch: Vec<Mutation>) -> Result<()> {
        let mut guard = self.entries.write().unwrap();
        for mutation in batch {
            match mutation {
                Mutation::Put(key, value) => {
                    guard.insert(key, value);
                }
                Mutation::Delete(key) => {
                    guard.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn range(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn snapshot(&self) -> Result<Box<dyn StoreSnapshot>> {
        Ok(Box::new(MemorySnapshot {
            entries: self.entries.read().unwrap().clone(),
        }))
    }
}

struct MemorySnapshot {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl StoreSnapshot for MemorySnapshot {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn range(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(self
            .entries
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutate_is_visible_to_get() {
        let store = MemoryStore::new();
        store
            .mutate(vec![Mutation::Put(b"a".to_vec(), b"1".to_vec())])
            .unwrap();
        assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn range_respects_prefix_and_order() {
        let store = MemoryStore::new();
        store
            .mutate(vec![
                Mutation::Put(b"a/2".to_vec(), b"2".to_vec()),
                Mutation::Put(b"a/1".to_vec(), b"1".to_vec()),
                Mutation::Put(b"b/1".to_vec(), b"x".to_vec()),
            ])
            .unwrap();
        let got = store.range(b"a/").unwrap();
        assert_eq!(
            got,
            vec![
                (b"a/1".to_vec(), b"1".to_vec()),
                (b"a/2".to_vec(), b"2".to_vec()),
            ]
        );
    }

    #[test]
    fn snapshot_is_unaffected_by_later_mutations() {
        let store = MemoryStore::new();
        store
            .mutate(vec![Mutation::Put(b"a".to_vec(), b"1".to_vec())])
            .unwrap();
        let snap = store.snapshot().unwrap();
        store
            .mutate(vec![Mutation::Put(b"a".to_vec(), b"2".to_vec())])
            .unwrap();
        assert_eq!(snap.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.get(b"a").unwrap(), Some(b"2".to_vec()));
    }
}
