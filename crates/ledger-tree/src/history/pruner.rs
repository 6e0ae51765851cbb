use crate::cache::Cache;
use crate::visitable::Visitable;

use super::navigator::HistoryTreeNavigator;
use super::position::Position;
use super::resolver::CacheResolver;

/// What a single-target pruner is being built for. Only the leaf
/// representation and the collect/cache wrapping differ between the
/// three; the descent itself is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Build the shape for a fresh insert: the target leaf carries the
    /// new event digest, and every newly-frozen node on the path is
    /// marked for a cache write.
    Insert,
    /// Build the shape for a membership search: the target leaf is
    /// `leafnil` (the verifier supplies it), and every off-path cache
    /// read is marked for collection into the audit path.
    Search,
    /// Rebuild a root from a proof: the target leaf carries the
    /// caller-supplied digest, and nothing is collected or cached.
    Verify,
}

fn prune_single<C: Cache<Position>>(
    nav: &HistoryTreeNavigator,
    resolver: &impl CacheResolver,
    pos: Position,
    mode: Mode,
    leaf_value: Option<&[u8]>,
    cache: &C,
) -> Visitable<Position> {
    if resolver.should_get_from_cache(nav, &pos) {
        let digest = cache
            .get(&pos)
            .unwrap_or_else(|| panic!("frozen position {pos} missing from cache"));
        let node = Visitable::cached(pos, digest);
        return match mode {
            Mode::Search => Visitable::collectable(node),
            Mode::Insert | Mode::Verify => node,
        };
    }

    let node = if nav.is_leaf(&pos) {
        match mode {
            Mode::Search => Visitable::leaf_nil(pos),
            Mode::Insert | Mode::Verify => Visitable::leaf(
                pos,
                leaf_value
                    .expect("target leaf requires a value in insert/verify mode")
                    .to_vec(),
            ),
        }
    } else if nav.right_exists(&pos) {
        let left = prune_single(nav, resolver, nav.go_to_left(&pos), mode, leaf_value, cache);
        let right = prune_single(nav, resolver, nav.go_to_right(&pos), mode, leaf_value, cache);
        if nav.is_root(&pos) {
            Visitable::root(pos, left, right)
        } else {
            Visitable::node(pos, left, right)
        }
    } else {
        let left = prune_single(nav, resolver, nav.go_to_left(&pos), mode, leaf_value, cache);
        Visitable::partial_node(pos, left)
    };

    match mode {
        Mode::Insert if nav.is_frozen(&pos) => Visitable::collectable(Visitable::cacheable(node)),
        _ => node,
    }
}

/// Build the shape for inserting `event_digest` as the newly appended
/// leaf at `nav.version()`.
pub fn insert_prune<C: Cache<Position>>(
    nav: &HistoryTreeNavigator,
    event_digest: &[u8],
    cache: &C,
) -> Visitable<Position> {
    let resolver = super::resolver::SingleTargetedCacheResolver {
        target: nav.version(),
    };
    prune_single(
        nav,
        &resolver,
        nav.root(),
        Mode::Insert,
        Some(event_digest),
        cache,
    )
}

/// Build the shape for a membership search at `target` against the
/// tree as of `nav.version()`. `target == nav.version()` is a search
/// against the current version; `target < nav.version()` is a
/// membership-at-an-older-version query (the "double targeted" case).
pub fn search_prune<C: Cache<Position>>(
    nav: &HistoryTreeNavigator,
    target: u64,
    cache: &C,
) -> Visitable<Position> {
    let resolver = super::resolver::DoubleTargetedCacheResolver { index: target };
    prune_single(nav, &resolver, nav.root(), Mode::Search, None, cache)
}

/// Rebuild a root digest for a membership proof: `target` carries
/// `leaf_value`, every other position on record in `cache`.
pub fn verify_prune<C: Cache<Position>>(
    nav: &HistoryTreeNavigator,
    target: u64,
    leaf_value: &[u8],
    cache: &C,
) -> Visitable<Position> {
    let resolver = super::resolver::DoubleTargetedCacheResolver { index: target };
    prune_single(
        nav,
        &resolver,
        nav.root(),
        Mode::Verify,
        Some(leaf_value),
        cache,
    )
}

/// Build the shape that lets a verifier reconstruct both a past root
/// (at `old_size` leaves) and the current root from a single audit
/// path. Mirrors the standard Merkle consistency-proof decomposition,
/// splitting the active subtree by which half still contains the
/// boundary and reading the other half straight from cache once it's
/// frozen (recursing into it, un-collected, while it remains partial).
fn prune_incremental<C: Cache<Position>>(
    nav: &HistoryTreeNavigator,
    pos: Position,
    old_size: u64,
    collect: bool,
    cache: &C,
) -> Visitable<Position> {
    if nav.is_leaf(&pos) {
        return cached_leaf_or_node(&pos, collect, cache);
    }
    if !nav.right_exists(&pos) {
        let left = prune_incremental(nav, nav.go_to_left(&pos), old_size, collect, cache);
        return Visitable::partial_node(pos, left);
    }

    let half = 1u64 << (pos.height - 1);
    let (left, right) = if old_size <= half {
        let left = prune_incremental(nav, nav.go_to_left(&pos), old_size, collect, cache);
        let right = off_path_subtree(nav, nav.go_to_right(&pos), collect, cache);
        (left, right)
    } else {
        let left = off_path_subtree(nav, nav.go_to_left(&pos), collect, cache);
        let right = prune_incremental(nav, nav.go_to_right(&pos), old_size - half, collect, cache);
        (left, right)
    };

    if nav.is_root(&pos) {
        Visitable::root(pos, left, right)
    } else {
        Visitable::node(pos, left, right)
    }
}

/// The side of the split that isn't on the active boundary path: read
/// straight from cache once frozen, otherwise keep descending through
/// ordinary navigator shape (it isn't part of the old tree yet).
fn off_path_subtree<C: Cache<Position>>(
    nav: &HistoryTreeNavigator,
    pos: Position,
    collect: bool,
    cache: &C,
) -> Visitable<Position> {
    if nav.is_frozen(&pos) {
        return cached_leaf_or_node(&pos, collect, cache);
    }
    if nav.is_leaf(&pos) {
        // Not frozen yet but already a leaf: the leaf exists (it must,
        // since it's reachable) but hasn't been observed as frozen by
        // this navigator's version — a vacuous case for well-formed
        // trees, handled defensively rather than assumed unreachable.
        let node = Visitable::leaf_nil(pos);
        return if collect { Visitable::collectable(node) } else { node };
    }
    if !nav.right_exists(&pos) {
        let left = off_path_subtree(nav, nav.go_to_left(&pos), collect, cache);
        return Visitable::partial_node(pos, left);
    }
    let left = off_path_subtree(nav, nav.go_to_left(&pos), collect, cache);
    let right = off_path_subtree(nav, nav.go_to_right(&pos), collect, cache);
    Visitable::node(pos, left, right)
}

fn cached_leaf_or_node<C: Cache<Position>>(
    pos: &Position,
    collect: bool,
    cache: &C,
) -> Visitable<Position> {
    let digest = cache
        .get(pos)
        .unwrap_or_else(|| panic!("frozen position {pos} missing from cache"));
    let node = Visitable::cached(*pos, digest);
    if collect {
        Visitable::collectable(node)
    } else {
        node
    }
}

/// Build the shape for an incremental/consistency proof between a tree
/// of `old_size` leaves and the tree at `nav.version()`, collecting
/// every digest the verifier will need into the audit path.
pub fn consistency_prune<C: Cache<Position>>(
    nav: &HistoryTreeNavigator,
    old_size: u64,
    cache: &C,
) -> Visitable<Position> {
    prune_incremental(nav, nav.root(), old_size, true, cache)
}

/// Rebuild both roots from a consistency proof without collecting
/// anything; every digest involved is already known from the proof.
pub fn verify_incremental_prune<C: Cache<Position>>(
    nav: &HistoryTreeNavigator,
    old_size: u64,
    cache: &C,
) -> Visitable<Position> {
    prune_incremental(nav, nav.root(), old_size, false, cache)
}
