use ledger_crypto::Digest;

use crate::position::Position;

/// A decorated tree shape produced by a pruner.
///
/// This is the tagged-sum the pruners build and the visitors walk.
/// `Collectable` and `Cacheable` are markers, not structural nodes: they
/// wrap another variant to say "after computing this subtree's digest,
/// do something with it" (write it to the cache, or add it to an audit
/// path) without the visitor needing to know which operation produced
/// the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visitable<P: Position> {
    /// A tree leaf. `None` payload means "unknown" (`leafnil`): the
    /// caller supplies the value later, used by search pruners that
    /// build the shape needed for an audit path without revealing it.
    Leaf(P, Option<Vec<u8>>),
    /// A full interior node, both children present.
    Node(P, Box<Visitable<P>>, Box<Visitable<P>>),
    /// An interior node whose right child doesn't exist yet.
    PartialNode(P, Box<Visitable<P>>),
    /// The top of the tree. Structurally identical to `Node`; kept
    /// distinct so visitors can special-case the outermost digest.
    Root(P, Box<Visitable<P>>, Box<Visitable<P>>),
    /// A digest read straight from the cache; its subtree was not
    /// recomputed.
    Cached(P, Digest),
    /// Marks `inner` for collection by the active visitor: a cache
    /// mutation during insert, an audit-path entry during search.
    Collectable(Box<Visitable<P>>),
    /// Marks `inner` as newly eligible for caching (its subtree is
    /// frozen as of the current version).
    Cacheable(Box<Visitable<P>>),
}

impl<P: Position> Visitable<P> {
    pub fn leaf(pos: P, payload: Vec<u8>) -> Self {
        Visitable::Leaf(pos, Some(payload))
    }

    pub fn leaf_nil(pos: P) -> Self {
        Visitable::Leaf(pos, None)
    }

    pub fn node(pos: P, left: Visitable<P>, right: Visitable<P>) -> Self {
        Visitable::Node(pos, Box::new(left), Box::new(right))
    }

    pub fn partial_node(pos: P, left: Visitable<P>) -> Self {
        Visitable::PartialNode(pos, Box::new(left))
    }

    pub fn root(pos: P, left: Visitable<P>, right: Visitable<P>) -> Self {
        Visitable::Root(pos, Box::new(left), Box::new(right))
    }

    pub fn cached(pos: P, digest: Digest) -> Self {
        Visitable::Cached(pos, digest)
    }

    pub fn collectable(inner: Visitable<P>) -> Self {
        Visitable::Collectable(Box::new(inner))
    }

    pub fn cacheable(inner: Visitable<P>) -> Self {
        Visitable::Cacheable(Box::new(inner))
    }

    /// The position this node (or the node it wraps) occupies, if any.
    /// `Collectable`/`Cacheable` recurse through their wrapped node.
    pub fn position(&self) -> &P {
        match self {
            Visitable::Leaf(p, _)
            | Visitable::Node(p, _, _)
            | Visitable::PartialNode(p, _)
            | Visitable::Root(p, _, _)
            | Visitable::Cached(p, _) => p,
            Visitable::Collectable(inner) | Visitable::Cacheable(inner) => inner.position(),
        }
    }
}
