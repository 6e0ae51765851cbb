use ledger_crypto::Hasher;

use crate::cache::Cache;
use crate::position::Position as _;
use crate::visitable::Visitable;

use super::navigator::HyperTreeNavigator;
use super::position::Position;
use super::resolver::CacheHeightResolver;

/// Domain tag hashed in place of a missing cache entry: an empty
/// subtree's digest is a fixed, position-bound value rather than an
/// absent one, so interior digests above it compute the same way
/// whether or not any key has ever landed underneath. Exposed beyond
/// this module so `ledger-storage`'s cache can reconstruct the same
/// default when it finds no real leaves below the cache-height
/// boundary instead of only the pruner ever producing it.
pub const EMPTY_SUBTREE_TAG: &[u8] = b"ledger-hyper-empty-subtree";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Insert,
    Search,
    Verify,
}

fn off_path_node<C: Cache<Position>, H: Hasher>(
    pos: &Position,
    mode: Mode,
    hasher: &H,
    cache: &C,
) -> Visitable<Position> {
    let digest = cache
        .get(pos)
        .unwrap_or_else(|| hasher.hash(&[&pos.to_hash_bytes(), EMPTY_SUBTREE_TAG]));
    let node = Visitable::cached(pos.clone(), digest);
    match mode {
        Mode::Search => Visitable::collectable(node),
        Mode::Insert | Mode::Verify => node,
    }
}

#[allow(clippy::too_many_arguments)]
fn prune_single<C: Cache<Position>, H: Hasher>(
    nav: &HyperTreeNavigator,
    resolver: &CacheHeightResolver,
    pos: Position,
    target_key: &[u8],
    mode: Mode,
    leaf_value: Option<&[u8]>,
    hasher: &H,
    cache: &C,
) -> Visitable<Position> {
    if nav.is_leaf(&pos) {
        let node = match mode {
            Mode::Search => Visitable::leaf_nil(pos),
            Mode::Insert | Mode::Verify => Visitable::leaf(
                pos,
                leaf_value
                    .expect("target leaf requires a value in insert/verify mode")
                    .to_vec(),
            ),
        };
        return node;
    }

    let on_right = nav.bit_for(&pos, target_key);
    let left_pos = nav.go_to_left(&pos);
    let right_pos = nav.go_to_right(&pos);

    let left = if on_right {
        off_path_node(&left_pos, mode, hasher, cache)
    } else {
        prune_single(nav, resolver, left_pos, target_key, mode, leaf_value, hasher, cache)
    };
    let right = if on_right {
        prune_single(nav, resolver, right_pos, target_key, mode, leaf_value, hasher, cache)
    } else {
        off_path_node(&right_pos, mode, hasher, cache)
    };

    let node = if nav.is_root(&pos) {
        Visitable::root(pos.clone(), left, right)
    } else {
        Visitable::node(pos.clone(), left, right)
    };

    match mode {
        Mode::Insert if resolver.is_cacheable(pos.height) => {
            Visitable::collectable(Visitable::cacheable(node))
        }
        _ => node,
    }
}

/// Build the shape for inserting `event_digest` at the leaf for
/// `key_digest`.
pub fn insert_prune<C: Cache<Position>, H: Hasher>(
    nav: &HyperTreeNavigator,
    resolver: &CacheHeightResolver,
    key_digest: &[u8],
    event_digest: &[u8],
    hasher: &H,
    cache: &C,
) -> Visitable<Position> {
    prune_single(
        nav,
        resolver,
        nav.root(),
        key_digest,
        Mode::Insert,
        Some(event_digest),
        hasher,
        cache,
    )
}

/// Build the shape for a membership search of `key_digest`.
pub fn search_prune<C: Cache<Position>, H: Hasher>(
    nav: &HyperTreeNavigator,
    resolver: &CacheHeightResolver,
    key_digest: &[u8],
    hasher: &H,
    cache: &C,
) -> Visitable<Position> {
    prune_single(nav, resolver, nav.root(), key_digest, Mode::Search, None, hasher, cache)
}

/// Rebuild a root digest for a membership proof of `key_digest` whose
/// current value is `leaf_value`.
pub fn verify_prune<C: Cache<Position>, H: Hasher>(
    nav: &HyperTreeNavigator,
    resolver: &CacheHeightResolver,
    key_digest: &[u8],
    leaf_value: &[u8],
    hasher: &H,
    cache: &C,
) -> Visitable<Position> {
    prune_single(
        nav,
        resolver,
        nav.root(),
        key_digest,
        Mode::Verify,
        Some(leaf_value),
        hasher,
        cache,
    )
}
