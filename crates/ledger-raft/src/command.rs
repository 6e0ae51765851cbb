use serde::{Deserialize, Serialize};

/// The only replicated command: an event to append. Applied
/// deterministically by every replica's state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LedgerCommand {
    Insert { event: Vec<u8> },
}

/// What `apply` returns to the client that proposed the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerResponse {
    pub version: u64,
    pub event_digest: Vec<u8>,
    pub history_digest: Vec<u8>,
    pub hyper_digest: Vec<u8>,
}

impl From<ledger_balloon::Snapshot> for LedgerResponse {
    fn from(snapshot: ledger_balloon::Snapshot) -> Self {
        Self {
            version: snapshot.version,
            event_digest: snapshot.event_digest.into_bytes(),
            history_digest: snapshot.history_digest.into_bytes(),
            hyper_digest: snapshot.hyper_digest.into_bytes(),
        }
    }
}
