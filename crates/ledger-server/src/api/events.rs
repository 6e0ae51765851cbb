use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::post, Json, Router};

use ledger_protocol::{EventRequest, SnapshotResponse};

use crate::error::ServerError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events", post(insert_event))
}

async fn insert_event(
    State(state): State<AppState>,
    Json(body): Json<EventRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let response = state.node.insert(body.event.into_vec()).await?;
    let snapshot = SnapshotResponse {
        version: response.version,
        event_digest: response.event_digest.into(),
        history_digest: response.history_digest.into(),
        hyper_digest: response.hyper_digest.into(),
    };
    Ok((StatusCode::CREATED, Json(snapshot)))
}
