//! Domain-separated digest abstraction for the ledger engine (C1).
//!
//! The tree code in `ledger-tree` never hashes bytes directly; it only
//! calls [`Hasher::leaf_hash`], [`Hasher::interior_hash`], and
//! [`Hasher::partial_hash`] so that the position of every node is
//! bound into its digest. This defeats the classic Merkle
//! second-preimage rearrangement attack.

mod digest;
mod hasher;

pub use digest::Digest;
pub use hasher::{Hasher, Sha256Hasher, XorHasher};
