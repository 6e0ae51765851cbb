use ledger_balloon::AuditPath;
use ledger_crypto::Digest;
use serde::{Deserialize, Serialize};

use crate::hex_bytes::HexBytes;

/// `POST /proofs/membership` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipRequest {
    pub key: HexBytes,
    pub version: u64,
}

/// `POST /proofs/digest-membership` request body — skips the server-side
/// `Hash(key)` step for clients that already have the key digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipDigestRequest {
    pub key_digest: Digest,
    pub version: u64,
}

/// Shared response body for both membership routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipResponse {
    pub exists: bool,
    pub key_digest: Digest,
    pub query_version: u64,
    pub actual_version: Option<u64>,
    pub current_version: u64,
    pub hyper_path: AuditPath,
    pub history_path: AuditPath,
}

impl From<ledger_balloon::MembershipProof> for MembershipResponse {
    fn from(proof: ledger_balloon::MembershipProof) -> Self {
        Self {
            exists: proof.exists,
            key_digest: proof.key_digest,
            query_version: proof.query_version,
            actual_version: proof.actual_version,
            current_version: proof.current_version,
            hyper_path: proof.hyper_path,
            history_path: proof.history_path,
        }
    }
}
