//! The Balloon coordinator: ties the history tree, the hyper tree, and a
//! key-value store together into one engine that answers inserts,
//! membership queries, and incremental (consistency) queries, publishing
//! a [`Snapshot`] after every insert.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod snapshot;

pub use config::BalloonConfig;
pub use coordinator::BalloonCoordinator;
pub use error::{BalloonError, Result};
pub use snapshot::{AuditPath, IncrementalProof, MembershipProof, Snapshot};

#[cfg(test)]
mod tests;
