//! History and hyper tree engine.
//!
//! Neither tree is stored as an in-memory structure: a pruner walks
//! the navigator's pure geometry for a single operation (insert,
//! search, verify, incremental) and produces a [`Visitable`] shape —
//! only the nodes that operation actually needs, decorated with
//! `Cached`/`Collectable`/`Cacheable` markers. A visitor then walks
//! that shape once to get a digest and, depending on the operation, a
//! batch of cache mutations or an audit path.

pub mod cache;
pub mod history;
pub mod hyper;
pub mod position;
pub mod visitable;
pub mod visitor;

pub use cache::{Cache, FakeCache, InMemoryCache};
pub use position::Position;
pub use visitable::Visitable;
pub use visitor::{collect_audit_path, collect_mutations, compute_hash, compute_root};
