use std::sync::{Arc, RwLock};

use ledger_crypto::{Digest, Hasher};
use ledger_storage::{keys, HyperStoreCache, Mutation, Store, StoreCache};
use ledger_tree::hyper::{self, CacheHeightResolver, HyperTreeNavigator};
use ledger_tree::history::{self, HistoryTreeNavigator};
use ledger_tree::{collect_audit_path, collect_mutations};

use crate::config::BalloonConfig;
use crate::error::{BalloonError, Result};
use crate::snapshot::{AuditPath, IncrementalProof, MembershipProof, Snapshot};

/// Orchestrates the history and hyper trees over a shared [`Store`]. Owns
/// the current version: inserts take an exclusive lock on it for the
/// duration of one apply, reads take a shared one, matching the "single
/// writer, concurrent consistent readers" policy the trees are built for.
pub struct BalloonCoordinator<H: Hasher> {
    store: Arc<dyn Store>,
    hasher: H,
    config: BalloonConfig,
    history_cache: StoreCache<history::Position>,
    hyper_cache: HyperStoreCache<H>,
    count: RwLock<u64>,
}

impl<H: Hasher> BalloonCoordinator<H> {
    pub fn new(store: Arc<dyn Store>, hasher: H, config: BalloonConfig) -> Result<Self> {
        let count = Self::load_count(store.as_ref())?;
        Ok(Self {
            history_cache: StoreCache::history(store.clone()),
            hyper_cache: HyperStoreCache::new(
                store.clone(),
                hasher.clone(),
                config.num_bits,
                config.cache_height,
            ),
            store,
            hasher,
            config,
            count: RwLock::new(count),
        })
    }

    fn load_count(store: &dyn Store) -> Result<u64> {
        let stored = store.get(&keys::meta_key(keys::META_CURRENT_VERSION))?;
        Ok(stored
            .map(|bytes| u64::from_be_bytes(bytes.try_into().unwrap_or_default()))
            .unwrap_or(0))
    }

    /// The highest committed version, or `None` if nothing has been
    /// inserted yet.
    pub fn current_version(&self) -> Option<u64> {
        let count = *self.count.read().unwrap();
        (count > 0).then(|| count - 1)
    }

    /// Re-reads the committed version count from `store`. Needed after
    /// anything other than `insert` writes directly into the backing
    /// store — a Raft snapshot install, most notably — so the in-memory
    /// counter doesn't go stale relative to the data it now sits on top
    /// of.
    pub fn reload(&self) -> Result<()> {
        let count = Self::load_count(self.store.as_ref())?;
        *self.count.write().unwrap() = count;
        Ok(())
    }

    /// Compute `event_digest`, prune both trees for the new leaf, persist
    /// the merged mutation batch atomically, and advance the version.
    pub fn insert(&self, event: &[u8]) -> Result<Snapshot> {
        let mut count_guard = self.count.write().unwrap();
        let version = *count_guard;
        let event_digest = self.hasher.hash(&[event]);

        let history_nav = HistoryTreeNavigator::new(version);
        let history_shape =
            history::insert_prune(&history_nav, event_digest.as_bytes(), &self.history_cache);
        let mut history_mutations = Vec::new();
        let history_digest =
            collect_mutations(&history_shape, &self.hasher, &mut history_mutations);

        let hyper_nav = HyperTreeNavigator::new(self.config.num_bits);
        let resolver = CacheHeightResolver {
            cache_height: self.config.cache_height,
        };
        let version_bytes = version.to_be_bytes();
        let hyper_shape = hyper::insert_prune(
            &hyper_nav,
            &resolver,
            event_digest.as_bytes(),
            &version_bytes,
            &self.hasher,
            &self.hyper_cache,
        );
        let mut hyper_mutations = Vec::new();
        let hyper_digest = collect_mutations(&hyper_shape, &self.hasher, &mut hyper_mutations);

        let mut batch = Vec::with_capacity(history_mutations.len() + hyper_mutations.len() + 3);
        for (pos, digest) in &history_mutations {
            batch.push(Mutation::Put(
                keys::history_cache_key(&pos.to_audit_key()),
                digest.clone().into_bytes(),
            ));
        }
        for (pos, digest) in &hyper_mutations {
            batch.push(Mutation::Put(
                keys::hyper_cache_key(&pos.to_audit_key()),
                digest.clone().into_bytes(),
            ));
        }
        batch.push(Mutation::Put(
            keys::leaf_key(version),
            event_digest.clone().into_bytes(),
        ));
        batch.push(Mutation::Put(
            keys::hyper_leaf_key(event_digest.as_bytes()),
            version_bytes.to_vec(),
        ));
        batch.push(Mutation::Put(
            keys::meta_key(keys::META_CURRENT_VERSION),
            (version + 1).to_be_bytes().to_vec(),
        ));

        self.store.mutate(batch)?;
        *count_guard = version + 1;
        drop(count_guard);

        tracing::debug!(version, %event_digest, "inserted event");

        Ok(Snapshot {
            version,
            event_digest,
            history_digest,
            hyper_digest,
        })
    }

    /// Membership of `key` (hashed to a key-digest) as of `query_version`.
    pub fn membership(&self, key: &[u8], query_version: u64) -> Result<MembershipProof> {
        let key_digest = self.hasher.hash(&[key]);
        self.membership_digest(key_digest, query_version)
    }

    /// Membership of a precomputed `key_digest`, skipping the hash step —
    /// the `/proofs/digest-membership` route.
    pub fn membership_digest(
        &self,
        key_digest: Digest,
        query_version: u64,
    ) -> Result<MembershipProof> {
        let count = *self.count.read().unwrap();
        if count == 0 || query_version > count - 1 {
            return Err(BalloonError::VersionNotReached {
                requested: query_version,
                current: count.saturating_sub(1),
            });
        }
        let current_version = count - 1;

        let actual_version = self
            .store
            .get(&keys::hyper_leaf_key(key_digest.as_bytes()))?
            .map(|bytes| u64::from_be_bytes(bytes.try_into().unwrap_or_default()));
        let exists = actual_version.is_some_and(|v| v <= query_version);

        let hyper_nav = HyperTreeNavigator::new(self.config.num_bits);
        let resolver = CacheHeightResolver {
            cache_height: self.config.cache_height,
        };
        let hyper_shape = hyper::search_prune(
            &hyper_nav,
            &resolver,
            key_digest.as_bytes(),
            &self.hasher,
            &self.hyper_cache,
        );
        let mut hyper_path: AuditPath = AuditPath::new();
        collect_audit_path(&hyper_shape, &self.hasher, &mut hyper_path);

        let history_path = if exists {
            let history_nav = HistoryTreeNavigator::new(query_version);
            let history_shape =
                history::search_prune(&history_nav, actual_version.unwrap(), &self.history_cache);
            let mut path: AuditPath = AuditPath::new();
            collect_audit_path(&history_shape, &self.hasher, &mut path);
            path
        } else {
            AuditPath::new()
        };

        Ok(MembershipProof {
            exists,
            key_digest,
            query_version,
            actual_version,
            current_version,
            hyper_path,
            history_path,
        })
    }

    /// Consistency proof between `start` and `end` (both inclusive
    /// version indices, `start <= end <= current_version`).
    pub fn incremental(&self, start: u64, end: u64) -> Result<IncrementalProof> {
        let count = *self.count.read().unwrap();
        if count == 0 || start > end || end > count - 1 {
            return Err(BalloonError::InvalidRange { start, end });
        }

        let nav = HistoryTreeNavigator::new(end);
        let shape = history::consistency_prune(&nav, start + 1, &self.history_cache);
        let mut path: AuditPath = AuditPath::new();
        collect_audit_path(&shape, &self.hasher, &mut path);

        Ok(IncrementalProof { start, end, path })
    }
}
