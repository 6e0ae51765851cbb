use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaftNodeError {
    #[error("storage error: {0}")]
    Storage(#[from] ledger_storage::StoreError),

    #[error("balloon error: {0}")]
    Balloon(#[from] ledger_balloon::BalloonError),

    #[error("raft error: {0}")]
    Raft(String),

    #[error("this node is not the leader; last known leader: {leader:?}")]
    NotLeader { leader: Option<u64> },

    #[error("network error contacting peer {peer}: {source}")]
    Network { peer: u64, source: reqwest::Error },
}

pub type Result<T> = std::result::Result<T, RaftNodeError>;
