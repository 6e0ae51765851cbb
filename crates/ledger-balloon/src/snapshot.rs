use std::collections::HashMap;

use ledger_crypto::Digest;

/// Published after every successful insert. The four fields the client
/// needs to verify a proof against: the version it was issued at, the
/// event's own digest, and the two tree roots at that version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub version: u64,
    pub event_digest: Digest,
    pub history_digest: Digest,
    pub hyper_digest: Digest,
}

/// Sibling digests a verifier needs, keyed by the position's canonical
/// text form (`"index|height"` for history, `"hex(prefix)|height"` for
/// hyper).
pub type AuditPath = HashMap<String, Digest>;

/// The result of a membership query: whether `key_digest` was ever
/// inserted at or before `query_version`, and if so at which version,
/// plus the two audit paths needed to verify both claims independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipProof {
    pub exists: bool,
    pub key_digest: Digest,
    pub query_version: u64,
    pub actual_version: Option<u64>,
    pub current_version: u64,
    pub hyper_path: AuditPath,
    pub history_path: AuditPath,
}

/// The result of an incremental (consistency) query between two
/// versions: a single audit path from which both the `start` and `end`
/// history roots can be recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementalProof {
    pub start: u64,
    pub end: u64,
    pub path: AuditPath,
}
