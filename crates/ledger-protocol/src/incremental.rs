use ledger_balloon::AuditPath;
use serde::{Deserialize, Serialize};

/// `POST /proofs/incremental` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementalRequest {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementalResponse {
    pub start: u64,
    pub end: u64,
    pub path: AuditPath,
}

impl From<ledger_balloon::IncrementalProof> for IncrementalResponse {
    fn from(proof: ledger_balloon::IncrementalProof) -> Self {
        Self {
            start: proof.start,
            end: proof.end,
            path: proof.path,
        }
    }
}
