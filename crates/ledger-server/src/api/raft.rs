use axum::extract::State;
use axum::response::IntoResponse;
use axum::{routing::post, Json, Router};

use openraft::raft::{AppendEntriesRequest, InstallSnapshotRequest, VoteRequest};

use ledger_raft::TypeConfig;

use crate::error::ServerError;
use crate::state::AppState;

/// Internal routes peers use to drive this node's `openraft::Raft`
/// handle. Not part of the public wire protocol's proof/event surface —
/// these carry consensus traffic only, mirroring [`ledger_raft::HttpNetwork`]
/// on the dialing side.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/raft/append-entries", post(append_entries))
        .route("/raft/install-snapshot", post(install_snapshot))
        .route("/raft/vote", post(vote))
}

async fn append_entries(
    State(state): State<AppState>,
    Json(body): Json<AppendEntriesRequest<TypeConfig>>,
) -> Result<impl IntoResponse, ServerError> {
    let response = state.node.append_entries(body).await?;
    Ok(Json(response))
}

async fn install_snapshot(
    State(state): State<AppState>,
    Json(body): Json<InstallSnapshotRequest<TypeConfig>>,
) -> Result<impl IntoResponse, ServerError> {
    let response = state.node.install_snapshot(body).await?;
    Ok(Json(response))
}

async fn vote(
    State(state): State<AppState>,
    Json(body): Json<VoteRequest<u64>>,
) -> Result<impl IntoResponse, ServerError> {
    let response = state.node.vote(body).await?;
    Ok(Json(response))
}
