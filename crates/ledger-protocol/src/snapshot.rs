use ledger_crypto::Digest;
use serde::{Deserialize, Serialize};

use crate::hex_bytes::HexBytes;

/// `POST /events` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    pub event: HexBytes,
}

/// `POST /events` response body — four fields, fixed order, matching
/// the data model's `{version, event_digest, history_digest,
/// hyper_digest}` snapshot tuple exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub version: u64,
    pub event_digest: Digest,
    pub history_digest: Digest,
    pub hyper_digest: Digest,
}

impl From<ledger_balloon::Snapshot> for SnapshotResponse {
    fn from(snapshot: ledger_balloon::Snapshot) -> Self {
        Self {
            version: snapshot.version,
            event_digest: snapshot.event_digest,
            history_digest: snapshot.history_digest,
            hyper_digest: snapshot.hyper_digest,
        }
    }
}
