use std::sync::Arc;

use ledger_crypto::{Hasher, Sha256Hasher};
use ledger_storage::MemoryStore;

use crate::config::BalloonConfig;
use crate::coordinator::BalloonCoordinator;
use crate::error::BalloonError;

fn coordinator() -> BalloonCoordinator<Sha256Hasher> {
    let store = Arc::new(MemoryStore::new());
    let config = BalloonConfig::for_output_len(Sha256Hasher.output_len());
    BalloonCoordinator::new(store, Sha256Hasher, config).unwrap()
}

#[test]
fn empty_log_has_no_current_version() {
    let coord = coordinator();
    assert_eq!(coord.current_version(), None);
}

#[test]
fn insert_advances_version_and_changes_digests() {
    let coord = coordinator();
    let first = coord.insert(b"event-a").unwrap();
    assert_eq!(first.version, 0);
    assert_eq!(coord.current_version(), Some(0));

    let second = coord.insert(b"event-b").unwrap();
    assert_eq!(second.version, 1);
    assert_ne!(first.history_digest, second.history_digest);
    assert_ne!(first.hyper_digest, second.hyper_digest);
    assert_eq!(coord.current_version(), Some(1));
}

#[test]
fn membership_finds_an_inserted_key_at_its_own_version() {
    let coord = coordinator();
    coord.insert(b"event-a").unwrap();
    let snap = coord.insert(b"event-b").unwrap();

    let proof = coord.membership(b"event-b", snap.version).unwrap();
    assert!(proof.exists);
    assert_eq!(proof.actual_version, Some(1));
    assert_eq!(proof.current_version, 1);
    assert_eq!(proof.key_digest, snap.event_digest);
    assert!(!proof.history_path.is_empty() || snap.version == 0);
}

#[test]
fn membership_of_an_unknown_key_reports_not_found() {
    let coord = coordinator();
    coord.insert(b"event-a").unwrap();

    let proof = coord.membership(b"never-inserted", 0).unwrap();
    assert!(!proof.exists);
    assert_eq!(proof.actual_version, None);
    assert!(proof.history_path.is_empty());
}

#[test]
fn membership_is_blind_to_insertions_after_the_query_version() {
    let coord = coordinator();
    coord.insert(b"event-a").unwrap();
    coord.insert(b"event-b").unwrap();

    // "event-b" landed at version 1; a query pinned to version 0 must
    // not see it yet even though the coordinator has since moved on.
    let proof = coord.membership(b"event-b", 0).unwrap();
    assert!(!proof.exists);
    assert_eq!(proof.current_version, 1);
}

#[test]
fn membership_past_the_current_version_is_a_client_error() {
    let coord = coordinator();
    coord.insert(b"event-a").unwrap();

    let err = coord.membership(b"event-a", 5).unwrap_err();
    assert!(matches!(
        err,
        BalloonError::VersionNotReached {
            requested: 5,
            current: 0
        }
    ));
}

#[test]
fn membership_against_an_empty_log_is_a_client_error() {
    let coord = coordinator();
    let err = coord.membership(b"anything", 0).unwrap_err();
    assert!(matches!(err, BalloonError::VersionNotReached { .. }));
}

#[test]
fn incremental_proof_covers_a_consistency_range() {
    let coord = coordinator();
    for i in 0..8u8 {
        coord.insert(&[i]).unwrap();
    }

    let proof = coord.incremental(0, 7).unwrap();
    assert_eq!(proof.start, 0);
    assert_eq!(proof.end, 7);
    assert!(!proof.path.is_empty());
}

#[test]
fn incremental_rejects_an_inverted_range() {
    let coord = coordinator();
    coord.insert(b"event-a").unwrap();
    coord.insert(b"event-b").unwrap();

    let err = coord.incremental(1, 0).unwrap_err();
    assert!(matches!(err, BalloonError::InvalidRange { start: 1, end: 0 }));
}

#[test]
fn incremental_rejects_an_end_past_current() {
    let coord = coordinator();
    coord.insert(b"event-a").unwrap();

    let err = coord.incremental(0, 9).unwrap_err();
    assert!(matches!(err, BalloonError::InvalidRange { .. }));
}

#[test]
fn reopening_the_same_store_resumes_from_the_persisted_version() {
    let store = Arc::new(MemoryStore::new());
    let config = BalloonConfig::for_output_len(Sha256Hasher.output_len());

    {
        let coord =
            BalloonCoordinator::new(store.clone(), Sha256Hasher, config).unwrap();
        coord.insert(b"event-a").unwrap();
        coord.insert(b"event-b").unwrap();
    }

    let reopened = BalloonCoordinator::new(store, Sha256Hasher, config).unwrap();
    assert_eq!(reopened.current_version(), Some(1));
    let proof = reopened.membership(b"event-a", 1).unwrap();
    assert!(proof.exists);
    assert_eq!(proof.actual_version, Some(0));
}
