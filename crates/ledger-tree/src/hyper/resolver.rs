/// Per-operation policy for the hyper tree's insert/search/verify
/// pruners. Unlike the history tree there is no notion of "frozen" —
/// the tree is always a complete binary tree of `num_bits` depth — so
/// the only cache decision is the configured cache-height boundary:
/// subtrees at or above it are read from (or written to) the cache;
/// below it they're cheap enough to recompute from the key-value store
/// on every query, and `ledger-storage`'s `Cache` implementation is
/// responsible for making that distinction transparent to the pruner.
#[derive(Debug, Clone, Copy)]
pub struct CacheHeightResolver {
    pub cache_height: u16,
}

impl CacheHeightResolver {
    pub fn is_cacheable(&self, height: u16) -> bool {
        height >= self.cache_height
    }
}
