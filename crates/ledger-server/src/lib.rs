pub mod api;
pub mod auth;
pub mod error;
pub mod state;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use ledger_crypto::Sha256Hasher;
use ledger_raft::LedgerRaftNode;

pub use state::AppState;

#[cfg(test)]
mod tests;

/// Assembles the full service: event ingestion, proof queries, and the
/// internal Raft transport, each under one shared [`AppState`]. Route
/// groups are merged and the auth layer attached before the unauthenticated
/// Raft group joins, so peers hitting `/raft/*` never need an `Api-Key`.
pub fn build_router(node: Arc<LedgerRaftNode<Sha256Hasher>>, api_key: Option<String>) -> Router {
    let state = AppState { node, api_key };

    Router::new()
        .merge(api::events::router())
        .merge(api::proof::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
        .merge(api::raft::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `listen` and serves `router` until the process is killed.
/// Kept here, rather than duplicated in `ledger-cli`, so the CLI binary
/// doesn't need its own `axum` dependency just to drive the listener.
pub async fn serve(router: Router, listen: std::net::SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
