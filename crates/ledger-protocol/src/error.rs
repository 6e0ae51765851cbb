use thiserror::Error;

/// The server-facing error taxonomy, carrying the HTTP status family a
/// transport layer should map it to without this crate depending on any
/// particular HTTP framework.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed event, bad version range, wrong-length key digest.
    #[error("{0}")]
    InputError(String),

    /// A membership or incremental query named a version the coordinator
    /// hasn't reached — a client error, not "try again later".
    #[error("requested version {requested} is past the current version {current}")]
    VersionNotReached { requested: u64, current: u64 },

    /// Write attempted on a non-leader replica.
    #[error("not the leader; retry against {leader_hint:?}")]
    NotLeader { leader_hint: Option<String> },

    /// A read exceeded its deadline.
    #[error("operation timed out")]
    Timeout,

    /// KV or raft I/O failure. The write it interrupted was never
    /// applied — the atomic batch guarantees no partial state.
    #[error("storage error: {0}")]
    StorageError(String),

    /// Lifecycle misuse (e.g. reopening an already-open FSM).
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl ApiError {
    /// The HTTP status family this error should surface as: 4xx for
    /// caller mistakes, 5xx for the server's own failures.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InputError(_) => 400,
            ApiError::VersionNotReached { .. } => 404,
            ApiError::NotLeader { .. } => 409,
            ApiError::Timeout => 504,
            ApiError::StorageError(_) => 500,
            ApiError::InvalidState(_) => 500,
        }
    }
}

impl From<ledger_balloon::BalloonError> for ApiError {
    fn from(err: ledger_balloon::BalloonError) -> Self {
        match err {
            ledger_balloon::BalloonError::VersionNotReached { requested, current } => {
                ApiError::VersionNotReached { requested, current }
            }
            ledger_balloon::BalloonError::InvalidRange { start, end } => {
                ApiError::InputError(format!("invalid version range [{start}, {end}]"))
            }
            ledger_balloon::BalloonError::Storage(e) => ApiError::StorageError(e.to_string()),
        }
    }
}
