use ledger_crypto::{Hasher, XorHasher};
use pretty_assertions::assert_eq;

use crate::cache::InMemoryCache;
use crate::position::Position as _;
use crate::visitable::Visitable;

use super::navigator::HyperTreeNavigator;
use super::position::Position;
use super::pruner::{insert_prune, search_prune};
use super::resolver::CacheHeightResolver;

fn pos(prefix: Vec<u8>, height: u16) -> Position {
    Position::new(prefix, height)
}

fn empty_digest(hasher: &XorHasher, p: &Position) -> ledger_crypto::Digest {
    hasher.hash(&[&p.to_hash_bytes(), super::pruner::EMPTY_SUBTREE_TAG])
}

#[test]
fn insert_into_a_two_bit_tree_walks_a_single_path() {
    let hasher = XorHasher;
    let cache: InMemoryCache<Position> = InMemoryCache::new();
    let nav = HyperTreeNavigator::new(2);
    let resolver = CacheHeightResolver { cache_height: 1 };

    let target_key = [0x80u8];
    let got = insert_prune(&nav, &resolver, &target_key, &[7], &hasher, &cache);

    let root_sibling = pos(vec![0x00], 1);
    let leaf_sibling = pos(vec![0xC0], 0);

    let want = Visitable::collectable(Visitable::cacheable(Visitable::root(
        pos(vec![0x00], 2),
        Visitable::cached(root_sibling.clone(), empty_digest(&hasher, &root_sibling)),
        Visitable::collectable(Visitable::cacheable(Visitable::node(
            pos(vec![0x80], 1),
            Visitable::leaf(pos(vec![0x80], 0), vec![7]),
            Visitable::cached(leaf_sibling.clone(), empty_digest(&hasher, &leaf_sibling)),
        ))),
    )));

    assert_eq!(got, want);
}

#[test]
fn search_leaves_the_target_leaf_unresolved_and_collects_siblings() {
    let hasher = XorHasher;
    let cache: InMemoryCache<Position> = InMemoryCache::new();
    let nav = HyperTreeNavigator::new(2);
    let resolver = CacheHeightResolver { cache_height: 1 };

    let target_key = [0x80u8];
    let got = search_prune(&nav, &resolver, &target_key, &hasher, &cache);

    let root_sibling = pos(vec![0x00], 1);
    let leaf_sibling = pos(vec![0xC0], 0);

    let want = Visitable::root(
        pos(vec![0x00], 2),
        Visitable::collectable(Visitable::cached(
            root_sibling.clone(),
            empty_digest(&hasher, &root_sibling),
        )),
        Visitable::node(
            pos(vec![0x80], 1),
            Visitable::leaf_nil(pos(vec![0x80], 0)),
            Visitable::collectable(Visitable::cached(
                leaf_sibling.clone(),
                empty_digest(&hasher, &leaf_sibling),
            )),
        ),
    );

    assert_eq!(got, want);
}
