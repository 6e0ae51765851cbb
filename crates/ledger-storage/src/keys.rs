//! Key-space layout. Every stored byte string lives under one of these
//! one-byte prefixes so a single physical store (in-memory or sled) can
//! hold every subsystem's state without collisions.

pub const HISTORY_CACHE: u8 = 0x01;
pub const HYPER_CACHE: u8 = 0x02;
pub const LEAF: u8 = 0x03;
pub const META: u8 = 0x04;
pub const HYPER_LEAF: u8 = 0x05;

/// Every prefix a full-state dump (Raft snapshot export/import) must
/// carry to reproduce the coordinator's trees and version counter.
pub const ALL_PREFIXES: [u8; 5] = [HISTORY_CACHE, HYPER_CACHE, LEAF, META, HYPER_LEAF];

pub const META_CURRENT_VERSION: &[u8] = b"current_version";
pub const META_LAST_APPLIED_INDEX: &[u8] = b"last_applied_index";

pub fn prefixed(prefix: u8, suffix: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + suffix.len());
    key.push(prefix);
    key.extend_from_slice(suffix);
    key
}

/// Event digest recorded at `version`, for history-tree leaf reconstruction.
pub fn leaf_key(version: u64) -> Vec<u8> {
    prefixed(LEAF, &version.to_be_bytes())
}

pub fn meta_key(name: &[u8]) -> Vec<u8> {
    prefixed(META, name)
}

pub fn history_cache_key(audit_key: &str) -> Vec<u8> {
    prefixed(HISTORY_CACHE, audit_key.as_bytes())
}

pub fn hyper_cache_key(audit_key: &str) -> Vec<u8> {
    prefixed(HYPER_CACHE, audit_key.as_bytes())
}

/// The version last inserted under a given key-digest, keyed directly by
/// the digest bytes (not `audit_key` form — this is a leaf payload, not a
/// node digest, so it never collides with `hyper_cache_key`'s keyspace).
pub fn hyper_leaf_key(key_digest: &[u8]) -> Vec<u8> {
    prefixed(HYPER_LEAF, key_digest)
}
