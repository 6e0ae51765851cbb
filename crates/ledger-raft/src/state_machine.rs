use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use openraft::storage::{RaftSnapshotBuilder, RaftStateMachine, Snapshot};
use openraft::{
    Entry, EntryPayload, LogId, OptionalSend, SnapshotMeta, StorageError, StorageIOError,
    StoredMembership,
};

use ledger_balloon::BalloonCoordinator;
use ledger_crypto::Hasher;
use ledger_storage::{keys, Mutation, Store};

use crate::command::{LedgerCommand, LedgerResponse};
use crate::types::TypeConfig;

/// Applies committed log entries to the Balloon coordinator. Every replica
/// runs the same sequence of `Insert` commands in the same order, so their
/// coordinators converge to identical snapshots without talking to each
/// other outside of the Raft log itself.
pub struct LedgerStateMachine<H: Hasher> {
    store: Arc<dyn Store>,
    coordinator: Arc<BalloonCoordinator<H>>,
    last_applied: Option<LogId<u64>>,
    last_membership: StoredMembership<u64, openraft::BasicNode>,
}

impl<H: Hasher> LedgerStateMachine<H> {
    pub fn new(store: Arc<dyn Store>, coordinator: Arc<BalloonCoordinator<H>>) -> Self {
        let last_applied = Self::load_last_applied(store.as_ref());
        Self {
            store,
            coordinator,
            last_applied,
            last_membership: StoredMembership::default(),
        }
    }

    fn load_last_applied(store: &dyn Store) -> Option<LogId<u64>> {
        let bytes = store
            .get(&keys::meta_key(keys::META_LAST_APPLIED_INDEX))
            .ok()??;
        serde_json::from_slice(&bytes).ok()
    }

    fn persist_last_applied(&self, log_id: &LogId<u64>) -> Result<(), StorageError<u64>> {
        let encoded = serde_json::to_vec(log_id).map_err(|e| {
            StorageIOError::write_state_machine(&e)
        })?;
        self.store
            .mutate(vec![Mutation::Put(
                keys::meta_key(keys::META_LAST_APPLIED_INDEX),
                encoded,
            )])
            .map_err(|e| StorageIOError::write_state_machine(&e).into())
    }
}

#[async_trait]
impl<H: Hasher> RaftSnapshotBuilder<TypeConfig>
    for LedgerStateMachine<H>
{
    /// Dumps every key under `keys::ALL_PREFIXES` from a point-in-time
    /// store snapshot — the history/hyper caches, leaf digests, and the
    /// version counter, i.e. everything a freshly opened FSM needs to
    /// reproduce the same version and tree roots after `install_snapshot`.
    async fn build_snapshot(&mut self) -> Result<Snapshot<TypeConfig>, StorageError<u64>> {
        let store_snapshot = self
            .store
            .snapshot()
            .map_err(|e| StorageIOError::read_state_machine(&e))?;
        let mut entries = Vec::new();
        for prefix in keys::ALL_PREFIXES {
            entries.extend(
                store_snapshot
                    .range(&[prefix])
                    .map_err(|e| StorageIOError::read_state_machine(&e))?,
            );
        }
        let data = serde_json::to_vec(&entries)
            .map_err(|e| StorageIOError::read_state_machine(&e))?;

        let meta = SnapshotMeta {
            last_log_id: self.last_applied,
            last_membership: self.last_membership.clone(),
            snapshot_id: self
                .last_applied
                .map(|l| format!("{}-{}", l.leader_id, l.index))
                .unwrap_or_else(|| "empty".to_string()),
        };
        Ok(Snapshot {
            meta,
            snapshot: Box::new(Cursor::new(data)),
        })
    }
}

#[async_trait]
impl<H: Hasher> RaftStateMachine<TypeConfig>
    for LedgerStateMachine<H>
{
    type SnapshotBuilder = Self;

    async fn applied_state(
        &mut self,
    ) -> Result<(Option<LogId<u64>>, StoredMembership<u64, openraft::BasicNode>), StorageError<u64>>
    {
        Ok((self.last_applied, self.last_membership.clone()))
    }

    async fn apply<I>(&mut self, entries: I) -> Result<Vec<LedgerResponse>, StorageError<u64>>
    where
        I: IntoIterator<Item = Entry<TypeConfig>> + OptionalSend,
    {
        let mut responses = Vec::new();
        for entry in entries {
            self.last_applied = Some(entry.log_id);
            match entry.payload {
                EntryPayload::Blank => {
                    responses.push(LedgerResponse {
                        version: self.coordinator.current_version().unwrap_or(0),
                        event_digest: Vec::new(),
                        history_digest: Vec::new(),
                        hyper_digest: Vec::new(),
                    });
                }
                EntryPayload::Normal(LedgerCommand::Insert { event }) => {
                    let snapshot = self
                        .coordinator
                        .insert(&event)
                        .map_err(|e| StorageIOError::write_state_machine(&e))?;
                    responses.push(snapshot.into());
                }
                EntryPayload::Membership(membership) => {
                    self.last_membership =
                        StoredMembership::new(Some(entry.log_id), membership);
                    responses.push(LedgerResponse {
                        version: self.coordinator.current_version().unwrap_or(0),
                        event_digest: Vec::new(),
                        history_digest: Vec::new(),
                        hyper_digest: Vec::new(),
                    });
                }
            }
            self.persist_last_applied(&entry.log_id)?;
        }
        Ok(responses)
    }

    async fn get_snapshot_builder(&mut self) -> Self::SnapshotBuilder {
        Self {
            store: self.store.clone(),
            coordinator: self.coordinator.clone(),
            last_applied: self.last_applied,
            last_membership: self.last_membership.clone(),
        }
    }

    async fn begin_receiving_snapshot(
        &mut self,
    ) -> Result<Box<Cursor<Vec<u8>>>, StorageError<u64>> {
        Ok(Box::new(Cursor::new(Vec::new())))
    }

    /// Replays a `build_snapshot` dump into the local store and refreshes
    /// the coordinator's cached version count to match — the writes below
    /// bypass `BalloonCoordinator::insert` entirely, so nothing else
    /// would notice the store now holds different data.
    async fn install_snapshot(
        &mut self,
        meta: &SnapshotMeta<u64, openraft::BasicNode>,
        snapshot: Box<Cursor<Vec<u8>>>,
    ) -> Result<(), StorageError<u64>> {
        let entries: Vec<(Vec<u8>, Vec<u8>)> = serde_json::from_slice(snapshot.get_ref())
            .map_err(|e| StorageIOError::write_state_machine(&e))?;
        let batch = entries
            .into_iter()
            .map(|(key, value)| Mutation::Put(key, value))
            .collect();
        self.store
            .mutate(batch)
            .map_err(|e| StorageIOError::write_state_machine(&e))?;
        self.coordinator
            .reload()
            .map_err(|e| StorageIOError::write_state_machine(&e))?;

        self.last_applied = meta.last_log_id;
        self.last_membership = meta.last_membership.clone();
        if let Some(log_id) = meta.last_log_id {
            self.persist_last_applied(&log_id)?;
        }
        Ok(())
    }

    async fn get_current_snapshot(
        &mut self,
    ) -> Result<Option<Snapshot<TypeConfig>>, StorageError<u64>> {
        Ok(None)
    }
}
