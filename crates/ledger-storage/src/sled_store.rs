use crate::store::{Mutation, Result, Store, StoreError, StoreSnapshot};

/// A `sled`-backed `Store`. Durable, crash-safe single-node storage for
/// the history/hyper caches, events, and metadata — the Raft-backed FSM's
/// state machine persists through this.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let db = sled::open(path).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self { db })
    }

    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self { db })
    }
}

impl Store for SledStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db
            .get(key)
            .map(|opt| opt.map(|v| v.to_vec()))
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn mutate(&self, batch: Vec<Mutation>) -> Result<()> {
        let mut sled_batch = sled::Batch::default();
        for mutation in batch {
            match mutation {
                Mutation::Put(key, value) => sled_batch.insert(key, value),
                Mutation::Delete(key) => sled_batch.remove(key),
            }
        }
        self.db
            .apply_batch(sled_batch)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn range(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.db
            .scan_prefix(prefix)
            .map(|entry| {
                entry
                    .map(|(k, v)| (k.to_vec(), v.to_vec()))
                    .map_err(|e| StoreError::Backend(e.to_string()))
            })
            .collect()
    }

    fn snapshot(&self) -> Result<Box<dyn StoreSnapshot>> {
        let frozen = self
            .db
            .export()
            .into_iter()
            .flat_map(|(_, _, entries)| entries)
            .map(|kv| (kv[0].clone(), kv[1].clone()))
            .collect::<Vec<_>>();
        Ok(Box::new(FrozenSnapshot { entries: frozen }))
    }
}

struct FrozenSnapshot {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl StoreSnapshot for FrozenSnapshot {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }

    fn range(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(self
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutate_is_visible_to_get() {
        let store = SledStore::temporary().unwrap();
        store
            .mutate(vec![Mutation::Put(b"a".to_vec(), b"1".to_vec())])
            .unwrap();
        assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn delete_removes_the_key() {
        let store = SledStore::temporary().unwrap();
        store
            .mutate(vec![Mutation::Put(b"a".to_vec(), b"1".to_vec())])
            .unwrap();
        store.mutate(vec![Mutation::Delete(b"a".to_vec())]).unwrap();
        assert_eq!(store.get(b"a").unwrap(), None);
    }

    #[test]
    fn range_respects_prefix() {
        let store = SledStore::temporary().unwrap();
        store
            .mutate(vec![
                Mutation::Put(b"a/1".to_vec(), b"1".to_vec()),
                Mutation::Put(b"b/1".to_vec(), b"x".to_vec()),
            ])
            .unwrap();
        let got = store.range(b"a/").unwrap();
        assert_eq!(got, vec![(b"a/1".to_vec(), b"1".to_vec())]);
    }
}
