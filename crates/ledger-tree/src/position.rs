use std::fmt::Debug;
use std::hash::Hash;

/// A coordinate in one of the two trees.
///
/// Positions are never hashed directly; [`ledger_crypto::Hasher`] folds
/// [`Position::to_hash_bytes`] into every node digest so the shape of the
/// tree can't be rearranged under a fixed set of digests.
pub trait Position: Clone + Eq + Hash + Debug {
    /// Encode this position for the domain-separated hasher.
    fn to_hash_bytes(&self) -> Vec<u8>;

    /// Encode this position as a cache/audit-path key. Distinct from
    /// [`Position::to_hash_bytes`] so storage layout can change without
    /// perturbing digests.
    fn to_audit_key(&self) -> String;
}
