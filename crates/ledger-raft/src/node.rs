use std::collections::BTreeMap;
use std::sync::Arc;

use openraft::{BasicNode, Config};

use ledger_balloon::BalloonCoordinator;
use ledger_crypto::Hasher;
use ledger_storage::Store;

use crate::command::{LedgerCommand, LedgerResponse};
use crate::error::{RaftNodeError, Result};
use crate::log_store::MemLogStore;
use crate::network::HttpNetworkFactory;
use crate::state_machine::LedgerStateMachine;
use crate::types::{Raft, TypeConfig};

/// Facade over an `openraft::Raft` handle plus the coordinator it drives.
/// `open` starts (and optionally bootstraps) a single-member cluster;
/// peers then join through [`LedgerRaftNode::join`] — one membership
/// change, applied through consensus, at a time.
pub struct LedgerRaftNode<H: Hasher> {
    id: u64,
    raft: Raft,
    coordinator: Arc<BalloonCoordinator<H>>,
}

impl<H: Hasher> LedgerRaftNode<H> {
    pub async fn open(
        id: u64,
        addr: String,
        store: Arc<dyn Store>,
        coordinator: Arc<BalloonCoordinator<H>>,
        bootstrap: bool,
    ) -> Result<Self> {
        let config = Arc::new(Config::default().validate().map_err(|e| {
            RaftNodeError::Raft(e.to_string())
        })?);

        let log_store = MemLogStore::default();
        let state_machine = LedgerStateMachine::new(store, coordinator.clone());
        let network = HttpNetworkFactory::new();

        let raft = openraft::Raft::new(id, config, network, log_store, state_machine)
            .await
            .map_err(|e| RaftNodeError::Raft(e.to_string()))?;

        if bootstrap {
            let mut members = BTreeMap::new();
            members.insert(id, BasicNode { addr });
            raft.initialize(members)
                .await
                .map_err(|e| RaftNodeError::Raft(e.to_string()))?;
        }

        Ok(Self {
            id,
            raft,
            coordinator,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn coordinator(&self) -> &Arc<BalloonCoordinator<H>> {
        &self.coordinator
    }

    pub fn is_leader(&self) -> bool {
        self.raft
            .metrics()
            .borrow()
            .current_leader
            .map(|l| l == self.id)
            .unwrap_or(false)
    }

    /// Proposes an `Insert` through consensus. Returns once a majority has
    /// committed and the local state machine has applied it.
    pub async fn insert(&self, event: Vec<u8>) -> Result<LedgerResponse> {
        let response = self
            .raft
            .client_write(LedgerCommand::Insert { event })
            .await
            .map_err(|e| RaftNodeError::Raft(e.to_string()))?;
        Ok(response.data)
    }

    pub async fn join(&self, id: u64, addr: String) -> Result<()> {
        self.raft
            .add_learner(id, BasicNode { addr: addr.clone() }, true)
            .await
            .map_err(|e| RaftNodeError::Raft(e.to_string()))?;

        let mut members: BTreeMap<u64, BasicNode> = self
            .raft
            .metrics()
            .borrow()
            .membership_config
            .nodes()
            .map(|(id, node)| (*id, node.clone()))
            .collect();
        members.insert(id, BasicNode { addr });

        self.raft
            .change_membership(members.into_keys().collect::<Vec<_>>(), false)
            .await
            .map_err(|e| RaftNodeError::Raft(e.to_string()))?;
        Ok(())
    }

    pub async fn remove(&self, id: u64) -> Result<()> {
        let members: Vec<u64> = self
            .raft
            .metrics()
            .borrow()
            .membership_config
            .nodes()
            .map(|(node_id, _)| *node_id)
            .filter(|node_id| *node_id != id)
            .collect();
        self.raft
            .change_membership(members, false)
            .await
            .map_err(|e| RaftNodeError::Raft(e.to_string()))?;
        Ok(())
    }

    /// Raft RPC passthroughs used by the HTTP transport to hand incoming
    /// peer requests straight to the local `openraft::Raft` handle.
    pub async fn append_entries(
        &self,
        rpc: openraft::raft::AppendEntriesRequest<TypeConfig>,
    ) -> Result<openraft::raft::AppendEntriesResponse<u64>> {
        self.raft
            .append_entries(rpc)
            .await
            .map_err(|e| RaftNodeError::Raft(e.to_string()))
    }

    pub async fn install_snapshot(
        &self,
        rpc: openraft::raft::InstallSnapshotRequest<TypeConfig>,
    ) -> Result<openraft::raft::InstallSnapshotResponse<u64>> {
        self.raft
            .install_snapshot(rpc)
            .await
            .map_err(|e| RaftNodeError::Raft(e.to_string()))
    }

    pub async fn vote(
        &self,
        rpc: openraft::raft::VoteRequest<u64>,
    ) -> Result<openraft::raft::VoteResponse<u64>> {
        self.raft
            .vote(rpc)
            .await
            .map_err(|e| RaftNodeError::Raft(e.to_string()))
    }

    pub async fn close(&self, wait_for_shutdown: bool) -> Result<()> {
        let handle = self
            .raft
            .shutdown()
            .await
            .map_err(|e| RaftNodeError::Raft(e.to_string()))?;
        if wait_for_shutdown {
            let _ = handle;
        }
        Ok(())
    }
}
