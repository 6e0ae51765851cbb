use sha2::{Digest as _, Sha256};

use crate::Digest;

/// Domain-separated digest function used throughout the dual-tree engine.
///
/// Every hash call is either a [`Hasher::leaf_hash`], an
/// [`Hasher::interior_hash`], or a [`Hasher::partial_hash`] — the three
/// variants fold the node's own position into the input so that
/// rearranging digests between positions can never produce a valid
/// second preimage. Implementors only need to provide the raw
/// variadic-slices `hash` primitive; the three variants are derived from
/// it with a one-byte domain tag prepended.
pub trait Hasher: Clone + Send + Sync + 'static {
    /// Length in bytes of every digest this hasher produces.
    fn output_len(&self) -> usize;

    /// Hash the concatenation of `chunks`. Implementations must be
    /// deterministic and must always return `output_len()` bytes.
    fn hash(&self, chunks: &[&[u8]]) -> Digest;

    /// Hash a leaf: a value or event digest bound to its position.
    fn leaf_hash(&self, position: &[u8], payload: &[u8]) -> Digest {
        self.hash(&[&[0x00], position, payload])
    }

    /// Hash a full interior node: both children present.
    fn interior_hash(&self, position: &[u8], left: &Digest, right: &Digest) -> Digest {
        self.hash(&[&[0x01], position, left.as_bytes(), right.as_bytes()])
    }

    /// Hash an interior node whose right subtree does not exist yet.
    fn partial_hash(&self, position: &[u8], left: &Digest) -> Digest {
        self.hash(&[&[0x02], position, left.as_bytes()])
    }
}

/// Production hasher: SHA-256, L = 32 bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn output_len(&self) -> usize {
        32
    }

    fn hash(&self, chunks: &[&[u8]]) -> Digest {
        let mut hasher = Sha256::new();
        for chunk in chunks {
            hasher.update(chunk);
        }
        Digest::new(hasher.finalize().to_vec())
    }
}

/// A deliberately weak, single-byte hasher used only in tests: it XORs
/// every input byte together. It satisfies the same structural contract
/// as [`Sha256Hasher`] (leaf/interior/partial all fold position in) so
/// the engine's tree logic can be exercised without cryptographic cost,
/// and so golden test vectors stay readable as single hex bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct XorHasher;

impl Hasher for XorHasher {
    fn output_len(&self) -> usize {
        1
    }

    fn hash(&self, chunks: &[&[u8]]) -> Digest {
        let mut acc = 0u8;
        for chunk in chunks {
            for byte in *chunk {
                acc ^= byte;
            }
        }
        Digest::new(vec![acc])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_hasher_leaf_at_height_zero_is_identity() {
        let hasher = XorHasher;
        // height 0 encodes to an all-zero pair of bytes, so the leaf
        // digest degenerates to the payload itself.
        let position = [0u8; 2];
        let digest = hasher.leaf_hash(&position, &[0x00]);
        assert_eq!(digest.as_bytes(), &[0x00]);
    }

    #[test]
    fn sha256_hasher_output_len() {
        let hasher = Sha256Hasher;
        let digest = hasher.leaf_hash(&[0u8; 2], b"event");
        assert_eq!(digest.len(), 32);
    }

    #[test]
    fn sha256_is_position_binding() {
        let hasher = Sha256Hasher;
        let a = hasher.leaf_hash(&[0, 0], b"same-payload");
        let b = hasher.leaf_hash(&[0, 1], b"same-payload");
        assert_ne!(a, b);
    }
}
