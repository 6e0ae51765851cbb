use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Checks the single `Api-Key` header the wire protocol names. This is
/// the entire authentication surface — no signing, no sessions, no
/// scopes; stronger auth is left to a fronting proxy.
pub async fn require_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = &state.api_key else {
        return Ok(next.run(request).await);
    };

    match headers.get("Api-Key").and_then(|v| v.to_str().ok()) {
        Some(key) if key == expected => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
