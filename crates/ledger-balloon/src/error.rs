use thiserror::Error;

/// Errors the coordinator can return. `Storage` wraps whatever the KV
/// backend reports; the rest are taxonomy from the engine's own
/// invariants (never found past the current version, malformed ranges).
#[derive(Debug, Error)]
pub enum BalloonError {
    #[error("storage error: {0}")]
    Storage(#[from] ledger_storage::StoreError),

    /// A membership or incremental query named a version the coordinator
    /// has not reached yet. A client error, not a transient failure: the
    /// caller asked about a version that doesn't exist (yet).
    #[error("requested version {requested} is past the current version {current}")]
    VersionNotReached { requested: u64, current: u64 },

    /// `start > end`, or both requested from an empty log.
    #[error("invalid version range [{start}, {end}]")]
    InvalidRange { start: u64, end: u64 },
}

pub type Result<T> = std::result::Result<T, BalloonError>;
