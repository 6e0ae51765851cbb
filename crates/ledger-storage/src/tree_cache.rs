use std::marker::PhantomData;
use std::sync::Arc;

use ledger_crypto::{Digest, Hasher};
use ledger_tree::hyper::{HyperTreeNavigator, Position as HyperPosition, EMPTY_SUBTREE_TAG};
use ledger_tree::Cache;
use ledger_tree::Position;

use crate::keys;
use crate::store::{Mutation, Store};

/// Adapts any [`Store`] into a [`Cache`] for a tree's position type, keyed
/// by [`Position::to_audit_key`] under a fixed one-byte prefix. One
/// instance per tree (history, hyper) sharing the same underlying store.
pub struct StoreCache<P: Position> {
    store: Arc<dyn Store>,
    prefix: u8,
    _marker: PhantomData<P>,
}

impl<P: Position> StoreCache<P> {
    pub fn history(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            prefix: keys::HISTORY_CACHE,
            _marker: PhantomData,
        }
    }

    pub fn hyper(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            prefix: keys::HYPER_CACHE,
            _marker: PhantomData,
        }
    }

    fn key_for(&self, pos: &P) -> Vec<u8> {
        keys::prefixed(self.prefix, pos.to_audit_key().as_bytes())
    }

    /// Persist a batch of computed node digests, e.g. the mutations
    /// collected off a `Visitable` after an insert.
    pub fn put_all(&self, mutations: impl IntoIterator<Item = (P, Digest)>) -> crate::store::Result<()> {
        let batch = mutations
            .into_iter()
            .map(|(pos, digest)| Mutation::Put(self.key_for(&pos), digest.into_bytes()))
            .collect();
        self.store.mutate(batch)
    }
}

impl<P: Position> Cache<P> for StoreCache<P> {
    fn get(&self, pos: &P) -> Option<Digest> {
        self.store
            .get(&self.key_for(pos))
            .ok()
            .flatten()
            .map(Digest::from)
    }
}

/// Adapts a [`Store`] into a [`Cache`] for the hyper tree specifically.
/// Unlike the plain [`StoreCache`], a miss below `cache_height` isn't
/// treated as "nothing cached yet" — the hyper tree never materializes
/// those subtrees at all, so the digest has to be rebuilt from whatever
/// real leaves (`keys::HYPER_LEAF` entries) live under that position,
/// the same way the insert pruner would have folded them if they'd all
/// been inserted in one pass.
pub struct HyperStoreCache<H: Hasher> {
    store: Arc<dyn Store>,
    hasher: H,
    nav: HyperTreeNavigator,
    cache_height: u16,
}

impl<H: Hasher> HyperStoreCache<H> {
    pub fn new(store: Arc<dyn Store>, hasher: H, num_bits: u16, cache_height: u16) -> Self {
        Self {
            store,
            hasher,
            nav: HyperTreeNavigator::new(num_bits),
            cache_height,
        }
    }

    fn key_for(&self, pos: &HyperPosition) -> Vec<u8> {
        keys::hyper_cache_key(&pos.to_audit_key())
    }

    pub fn put_all(
        &self,
        mutations: impl IntoIterator<Item = (HyperPosition, Digest)>,
    ) -> crate::store::Result<()> {
        let batch = mutations
            .into_iter()
            .map(|(pos, digest)| Mutation::Put(self.key_for(&pos), digest.into_bytes()))
            .collect();
        self.store.mutate(batch)
    }

    /// `true` when every bit of `key_digest` that `pos`'s partial byte
    /// fixes agrees with `pos.prefix`'s corresponding byte.
    fn partial_byte_matches(key_digest: &[u8], byte_index: usize, expected: u8, bits: usize) -> bool {
        let mask = 0xFFu8 << (8 - bits);
        key_digest
            .get(byte_index)
            .map(|b| b & mask == expected & mask)
            .unwrap_or(false)
    }

    /// Every `(key_digest, leaf_value)` pair actually stored under
    /// `pos`'s prefix, read straight from the KV store.
    fn leaves_under(&self, pos: &HyperPosition) -> Vec<(Vec<u8>, Vec<u8>)> {
        let fixed_bits = (self.nav.num_bits() - pos.height) as usize;
        let full_bytes = fixed_bits / 8;
        let remaining_bits = fixed_bits % 8;

        let Ok(raw) = self
            .store
            .range(&keys::prefixed(keys::HYPER_LEAF, &pos.prefix[..full_bytes]))
        else {
            return Vec::new();
        };

        raw.into_iter()
            .filter_map(|(key, value)| {
                let key_digest = key.get(1..)?.to_vec();
                let matches = remaining_bits == 0
                    || Self::partial_byte_matches(
                        &key_digest,
                        full_bytes,
                        pos.prefix[full_bytes],
                        remaining_bits,
                    );
                matches.then_some((key_digest, value))
            })
            .collect()
    }

    /// Recomputes `pos`'s digest from `entries`, the real leaves
    /// currently stored under it, by recursing the same way
    /// `hyper::insert_prune` would over a single-pass bulk insert.
    fn fold(&self, pos: &HyperPosition, entries: &[(Vec<u8>, Vec<u8>)]) -> Digest {
        if self.nav.is_leaf(pos) {
            let (_, value) = &entries[0];
            return self.hasher.leaf_hash(&pos.to_hash_bytes(), value);
        }

        let left_pos = self.nav.go_to_left(pos);
        let right_pos = self.nav.go_to_right(pos);
        let mut left_entries = Vec::new();
        let mut right_entries = Vec::new();
        for entry in entries {
            if self.nav.bit_for(pos, &entry.0) {
                right_entries.push(entry.clone());
            } else {
                left_entries.push(entry.clone());
            }
        }

        let left = self.digest_for(&left_pos, left_entries);
        let right = self.digest_for(&right_pos, right_entries);
        self.hasher.interior_hash(&pos.to_hash_bytes(), &left, &right)
    }

    fn digest_for(&self, pos: &HyperPosition, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Digest {
        if entries.is_empty() {
            self.hasher.hash(&[&pos.to_hash_bytes(), EMPTY_SUBTREE_TAG])
        } else {
            self.fold(pos, &entries)
        }
    }
}

impl<H: Hasher> Cache<HyperPosition> for HyperStoreCache<H> {
    fn get(&self, pos: &HyperPosition) -> Option<Digest> {
        if pos.height >= self.cache_height {
            return self
                .store
                .get(&self.key_for(pos))
                .ok()
                .flatten()
                .map(Digest::from);
        }

        let entries = self.leaves_under(pos);
        if entries.is_empty() {
            None
        } else {
            Some(self.fold(pos, &entries))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use ledger_tree::history::Position as HistoryPosition;

    #[test]
    fn round_trips_a_digest_through_the_store() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let cache = StoreCache::<HistoryPosition>::history(store);
        let pos = HistoryPosition::new(3, 1);
        assert_eq!(Cache::get(&cache, &pos), None);
        cache
            .put_all(vec![(pos.clone(), Digest::new(vec![0xAB; 4]))])
            .unwrap();
        assert_eq!(Cache::get(&cache, &pos), Some(Digest::new(vec![0xAB; 4])));
    }

    #[test]
    fn history_and_hyper_caches_do_not_collide_on_the_same_store() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let history_cache = StoreCache::<HistoryPosition>::history(store.clone());
        let hyper_cache = StoreCache::<ledger_tree::hyper::Position>::hyper(store);

        let hpos = HistoryPosition::new(0, 0);
        history_cache
            .put_all(vec![(hpos.clone(), Digest::new(vec![0x01]))])
            .unwrap();

        let ypos = ledger_tree::hyper::HyperTreeNavigator::new(1).root();
        assert_eq!(Cache::get(&hyper_cache, &ypos), None);
    }
}
