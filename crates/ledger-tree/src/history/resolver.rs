use super::navigator::HistoryTreeNavigator;
use super::position::Position;

/// Per-operation policy for whether an off-path, frozen position should
/// be read straight from the cache instead of recomputed.
///
/// Only `on_path` varies between operations: a frozen position is
/// always safe to read from cache once it's known not to lie on the
/// path the pruner must still descend.
pub trait CacheResolver {
    fn on_path(&self, pos: &Position) -> bool;

    fn should_get_from_cache(&self, nav: &HistoryTreeNavigator, pos: &Position) -> bool {
        !self.on_path(pos) && nav.is_frozen(pos)
    }
}

/// Resolver for a single leaf of interest: insert (the newly appended
/// version), or membership search/verify at `target == version`.
pub struct SingleTargetedCacheResolver {
    pub target: u64,
}

impl CacheResolver for SingleTargetedCacheResolver {
    fn on_path(&self, pos: &Position) -> bool {
        pos.covers(self.target)
    }
}

/// Resolver for a membership proof at a past `index`, checked against a
/// tree at a later `version`. The navigator is constructed at
/// `version`, which already makes every not-yet-frozen ancestor of the
/// growing edge visible to the pruner; the resolver only needs to keep
/// the path to `index` open, so its `on_path` is identical to
/// [`SingleTargetedCacheResolver`]'s.
pub struct DoubleTargetedCacheResolver {
    pub index: u64,
}

impl CacheResolver for DoubleTargetedCacheResolver {
    fn on_path(&self, pos: &Position) -> bool {
        pos.covers(self.index)
    }
}
