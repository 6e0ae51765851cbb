use std::sync::Arc;

use ledger_balloon::{BalloonConfig, BalloonCoordinator};
use ledger_crypto::{Hasher, Sha256Hasher};
use ledger_protocol::{IncrementalResponse, MembershipResponse, SnapshotResponse};
use ledger_storage::MemoryStore;

use crate::verify::{verify_incremental, verify_membership};

fn coordinator() -> BalloonCoordinator<Sha256Hasher> {
    let store: Arc<dyn ledger_storage::Store> = Arc::new(MemoryStore::default());
    let config = BalloonConfig::for_output_len(Sha256Hasher.output_len());
    BalloonCoordinator::new(store, Sha256Hasher, config).unwrap()
}

#[test]
fn a_freshly_inserted_key_verifies_against_its_own_snapshot() {
    let coordinator = coordinator();
    let snapshot = coordinator.insert(b"event-zero").unwrap();
    let proof = coordinator.membership(b"key-zero", 0).unwrap();

    assert!(verify_membership(
        &MembershipResponse::from(proof),
        &SnapshotResponse::from(snapshot),
        &Sha256Hasher,
    ));
}

#[test]
fn membership_fails_against_a_tampered_snapshot() {
    let coordinator = coordinator();
    let snapshot = coordinator.insert(b"event-zero").unwrap();
    let proof = coordinator.membership(b"key-zero", 0).unwrap();

    let mut tampered = SnapshotResponse::from(snapshot);
    tampered.history_digest = ledger_crypto::Digest::new(vec![0xFF; 32]);

    assert!(!verify_membership(
        &MembershipResponse::from(proof),
        &tampered,
        &Sha256Hasher,
    ));
}

#[test]
fn membership_of_an_absent_key_verifies_as_not_present() {
    let coordinator = coordinator();
    coordinator.insert(b"event-zero").unwrap();
    let proof = coordinator.membership(b"never-inserted", 0).unwrap();
    assert!(!proof.exists);

    let snapshot = SnapshotResponse {
        version: 0,
        event_digest: ledger_crypto::Digest::new(vec![]),
        history_digest: ledger_crypto::Digest::new(vec![]),
        hyper_digest: ledger_crypto::Digest::new(vec![]),
    };
    assert!(verify_membership(
        &MembershipResponse::from(proof),
        &snapshot,
        &Sha256Hasher,
    ));
}

#[test]
fn an_incremental_proof_verifies_both_endpoint_roots() {
    let coordinator = coordinator();
    let mut snapshots = Vec::new();
    for i in 0..8u32 {
        snapshots.push(coordinator.insert(format!("event-{i}").as_bytes()).unwrap());
    }

    let proof = coordinator.incremental(2, 6).unwrap();
    assert!(verify_incremental(
        &IncrementalResponse::from(proof),
        &SnapshotResponse::from(snapshots[2].clone()),
        &SnapshotResponse::from(snapshots[6].clone()),
        &Sha256Hasher,
    ));
}
