use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use ledger_protocol::ApiError;

/// Wraps [`ApiError`] (and the errors that feed into it) for axum,
/// mapping `status_code()` onto the response — every variant carries a
/// real status instead of collapsing to 500.
pub struct ServerError(pub ApiError);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

impl From<ledger_balloon::BalloonError> for ServerError {
    fn from(err: ledger_balloon::BalloonError) -> Self {
        Self(err.into())
    }
}

impl From<ledger_raft::RaftNodeError> for ServerError {
    fn from(err: ledger_raft::RaftNodeError) -> Self {
        let mapped = match err {
            ledger_raft::RaftNodeError::Storage(e) => {
                ApiError::StorageError(e.to_string())
            }
            ledger_raft::RaftNodeError::Balloon(e) => e.into(),
            ledger_raft::RaftNodeError::NotLeader { leader } => ApiError::NotLeader {
                leader_hint: leader.map(|id| id.to_string()),
            },
            ledger_raft::RaftNodeError::Raft(msg) => ApiError::InvalidState(msg),
            ledger_raft::RaftNodeError::Network { peer, source } => {
                ApiError::StorageError(format!("peer {peer} unreachable: {source}"))
            }
        };
        Self(mapped)
    }
}

impl From<ApiError> for ServerError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}
