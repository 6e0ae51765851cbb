use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use ledger_balloon::{BalloonConfig, BalloonCoordinator};
use ledger_crypto::{Hasher, Sha256Hasher};
use ledger_raft::LedgerRaftNode;
use ledger_storage::MemoryStore;

async fn test_router(api_key: Option<String>) -> axum::Router {
    let store: Arc<dyn ledger_storage::Store> = Arc::new(MemoryStore::default());
    let hasher = Sha256Hasher;
    let config = BalloonConfig::for_output_len(hasher.output_len());
    let coordinator = Arc::new(BalloonCoordinator::new(store.clone(), hasher, config).unwrap());
    let node = Arc::new(
        LedgerRaftNode::open(1, "127.0.0.1:9101".to_string(), store, coordinator, true)
            .await
            .unwrap(),
    );
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    crate::build_router(node, api_key)
}

#[tokio::test]
async fn posting_an_event_returns_a_snapshot() {
    let app = test_router(None).await;

    let request = Request::builder()
        .method("POST")
        .uri("/events")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"event":"deadbeef"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn missing_api_key_is_rejected_when_one_is_configured() {
    let app = test_router(Some("secret".to_string())).await;

    let request = Request::builder()
        .method("POST")
        .uri("/events")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"event":"deadbeef"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn membership_query_against_an_empty_log_is_a_404() {
    let app = test_router(None).await;

    let request = Request::builder()
        .method("POST")
        .uri("/proofs/membership")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"key":"deadbeef","version":0}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
