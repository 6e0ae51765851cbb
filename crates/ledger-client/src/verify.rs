use ledger_balloon::{AuditPath, BalloonConfig};
use ledger_crypto::{Digest, Hasher};
use ledger_protocol::{IncrementalResponse, MembershipResponse, SnapshotResponse};
use ledger_tree::hyper::{self, CacheHeightResolver, HyperTreeNavigator};
use ledger_tree::history::{self, HistoryTreeNavigator};
use ledger_tree::{compute_root, Cache, Position};

/// Read-only `Cache` over a received audit path. The verifier never
/// touches `ledger-storage`; every digest it needs to recompute a root
/// must already be in the path the server sent.
struct AuditPathCache<'a>(&'a AuditPath);

impl<P: Position> Cache<P> for AuditPathCache<'_> {
    fn get(&self, pos: &P) -> Option<Digest> {
        self.0.get(&pos.to_audit_key()).cloned()
    }
}

/// Reconstructs both tree roots from a membership proof and checks them
/// against `snapshot`'s own digests, rather than taking the inserted
/// event as a separate argument — the caller already knows what it
/// inserted and the snapshot carries the digest to check against.
pub fn verify_membership<H: Hasher>(
    proof: &MembershipResponse,
    snapshot: &SnapshotResponse,
    hasher: &H,
) -> bool {
    let config = BalloonConfig::for_output_len(hasher.output_len());
    let resolver = CacheHeightResolver {
        cache_height: config.cache_height,
    };
    let hyper_nav = HyperTreeNavigator::new(config.num_bits);
    let hyper_cache = AuditPathCache(&proof.hyper_path);

    let Some(actual_version) = proof.actual_version else {
        return !proof.exists;
    };
    if !proof.exists {
        return false;
    }

    let hyper_shape = hyper::verify_prune(
        &hyper_nav,
        &resolver,
        proof.key_digest.as_bytes(),
        &actual_version.to_be_bytes(),
        hasher,
        &hyper_cache,
    );
    let hyper_digest = compute_root(&hyper_shape, hasher);
    if hyper_digest != snapshot.hyper_digest {
        return false;
    }

    let history_nav = HistoryTreeNavigator::new(proof.query_version);
    let history_cache = AuditPathCache(&proof.history_path);
    let history_shape = history::verify_prune(
        &history_nav,
        actual_version,
        snapshot.event_digest.as_bytes(),
        &history_cache,
    );
    let history_digest = compute_root(&history_shape, hasher);
    history_digest == snapshot.history_digest
}

/// Reconstructs the start- and end-version history roots from a single
/// incremental proof's audit path and checks them against the two
/// snapshots the caller already holds. The same position→digest map
/// feeds both navigators: a frozen history position's digest never
/// changes once frozen, so the audit path the server collected while
/// walking the end-version tree already carries everything needed to
/// walk the start-version tree too.
pub fn verify_incremental<H: Hasher>(
    proof: &IncrementalResponse,
    start_snapshot: &SnapshotResponse,
    end_snapshot: &SnapshotResponse,
    hasher: &H,
) -> bool {
    if proof.start != start_snapshot.version || proof.end != end_snapshot.version {
        return false;
    }
    let cache = AuditPathCache(&proof.path);

    let end_nav = HistoryTreeNavigator::new(proof.end);
    let end_shape = history::verify_incremental_prune(&end_nav, proof.start + 1, &cache);
    let end_digest = compute_root(&end_shape, hasher);

    let start_nav = HistoryTreeNavigator::new(proof.start);
    let start_shape = history::verify_incremental_prune(&start_nav, proof.start + 1, &cache);
    let start_digest = compute_root(&start_shape, hasher);

    start_digest == start_snapshot.history_digest && end_digest == end_snapshot.history_digest
}
