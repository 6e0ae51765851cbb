use std::collections::HashMap;

use ledger_crypto::{Digest, Hasher};

use crate::position::Position;
use crate::visitable::Visitable;

/// Post-order digest computation. Every variant folds into its parent
/// through the hasher's position-binding `leaf_hash`/`interior_hash`/
/// `partial_hash`; `Cached` short-circuits the recursion.
pub fn compute_hash<P: Position, H: Hasher>(v: &Visitable<P>, hasher: &H) -> Digest {
    match v {
        Visitable::Leaf(pos, payload) => {
            hasher.leaf_hash(&pos.to_hash_bytes(), payload.as_deref().unwrap_or(&[]))
        }
        Visitable::Node(pos, left, right) | Visitable::Root(pos, left, right) => {
            let l = compute_hash(left, hasher);
            let r = compute_hash(right, hasher);
            hasher.interior_hash(&pos.to_hash_bytes(), &l, &r)
        }
        Visitable::PartialNode(pos, left) => {
            let l = compute_hash(left, hasher);
            hasher.partial_hash(&pos.to_hash_bytes(), &l)
        }
        Visitable::Cached(_, digest) => digest.clone(),
        Visitable::Collectable(inner) | Visitable::Cacheable(inner) => compute_hash(inner, hasher),
    }
}

/// Computes the root digest and, in the same pass, every cache mutation
/// implied by `Collectable` markers. Used by insert.
pub fn collect_mutations<P: Position, H: Hasher>(
    v: &Visitable<P>,
    hasher: &H,
    mutations: &mut Vec<(P, Digest)>,
) -> Digest {
    match v {
        Visitable::Collectable(inner) => {
            let digest = collect_mutations(inner, hasher, mutations);
            mutations.push((inner.position().clone(), digest.clone()));
            digest
        }
        Visitable::Cacheable(inner) => collect_mutations(inner, hasher, mutations),
        Visitable::Leaf(_, _) | Visitable::Cached(_, _) => compute_hash(v, hasher),
        Visitable::Node(pos, left, right) | Visitable::Root(pos, left, right) => {
            let l = collect_mutations(left, hasher, mutations);
            let r = collect_mutations(right, hasher, mutations);
            hasher.interior_hash(&pos.to_hash_bytes(), &l, &r)
        }
        Visitable::PartialNode(pos, left) => {
            let l = collect_mutations(left, hasher, mutations);
            hasher.partial_hash(&pos.to_hash_bytes(), &l)
        }
    }
}

/// Computes the root digest and, in the same pass, every audit-path
/// entry implied by `Collectable` markers. Used by search and by
/// incremental/consistency proof construction.
pub fn collect_audit_path<P: Position, H: Hasher>(
    v: &Visitable<P>,
    hasher: &H,
    audit_path: &mut HashMap<String, Digest>,
) -> Digest {
    match v {
        Visitable::Collectable(inner) => {
            let digest = collect_audit_path(inner, hasher, audit_path);
            audit_path.insert(inner.position().to_audit_key(), digest.clone());
            digest
        }
        Visitable::Cacheable(inner) => collect_audit_path(inner, hasher, audit_path),
        Visitable::Leaf(_, _) | Visitable::Cached(_, _) => compute_hash(v, hasher),
        Visitable::Node(pos, left, right) | Visitable::Root(pos, left, right) => {
            let l = collect_audit_path(left, hasher, audit_path);
            let r = collect_audit_path(right, hasher, audit_path);
            hasher.interior_hash(&pos.to_hash_bytes(), &l, &r)
        }
        Visitable::PartialNode(pos, left) => {
            let l = collect_audit_path(left, hasher, audit_path);
            hasher.partial_hash(&pos.to_hash_bytes(), &l)
        }
    }
}

/// Reconstructs a root digest from a shape produced by a verify pruner,
/// where the target leaf already carries its known value. Identical to
/// `compute_hash`; kept as a distinct name so call sites read as intent
/// ("verify this root"), not "compute some digest".
pub fn compute_root<P: Position, H: Hasher>(v: &Visitable<P>, hasher: &H) -> Digest {
    compute_hash(v, hasher)
}
