use std::sync::Arc;

use ledger_balloon::BalloonCoordinator;
use ledger_crypto::Sha256Hasher;
use ledger_raft::LedgerRaftNode;

#[derive(Clone)]
pub struct AppState {
    pub node: Arc<LedgerRaftNode<Sha256Hasher>>,
    pub api_key: Option<String>,
}

impl AppState {
    pub fn coordinator(&self) -> &Arc<BalloonCoordinator<Sha256Hasher>> {
        self.node.coordinator()
    }
}
