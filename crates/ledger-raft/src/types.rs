use std::io::Cursor;

use crate::command::{LedgerCommand, LedgerResponse};

openraft::declare_raft_types!(
    /// Binds the replicated command/response types to this project's node
    /// addressing. Node identity reuses `openraft::BasicNode` (a bare
    /// socket address) since cluster members are just peer HTTP endpoints.
    pub TypeConfig:
        D = LedgerCommand,
        R = LedgerResponse,
        NodeId = u64,
        Node = openraft::BasicNode,
        Entry = openraft::Entry<TypeConfig>,
        SnapshotData = Cursor<Vec<u8>>,
);

pub type Raft = openraft::Raft<TypeConfig>;
