use axum::extract::State;
use axum::response::IntoResponse;
use axum::{routing::post, Json, Router};

use ledger_protocol::{
    IncrementalRequest, IncrementalResponse, MembershipDigestRequest, MembershipRequest,
    MembershipResponse,
};

use crate::error::ServerError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/proofs/membership", post(membership))
        .route("/proofs/digest-membership", post(digest_membership))
        .route("/proofs/incremental", post(incremental))
}

async fn membership(
    State(state): State<AppState>,
    Json(body): Json<MembershipRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let proof = state
        .coordinator()
        .membership(body.key.as_bytes(), body.version)?;
    Ok(Json(MembershipResponse::from(proof)))
}

async fn digest_membership(
    State(state): State<AppState>,
    Json(body): Json<MembershipDigestRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let proof = state
        .coordinator()
        .membership_digest(body.key_digest, body.version)?;
    Ok(Json(MembershipResponse::from(proof)))
}

async fn incremental(
    State(state): State<AppState>,
    Json(body): Json<IncrementalRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let proof = state.coordinator().incremental(body.start, body.end)?;
    Ok(Json(IncrementalResponse::from(proof)))
}
