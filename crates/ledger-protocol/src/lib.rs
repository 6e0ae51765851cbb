//! Wire forms for the HTTP surface: JSON request/response bodies and
//! the error taxonomy a transport layer maps to status codes.
//!
//! [`ledger_balloon::AuditPath`] is reused as-is for both proof
//! responses — it's already a `HashMap<String, Digest>` and
//! [`ledger_crypto::Digest`] already serializes as a hex string, so no
//! separate wire-only audit-path type is needed.

pub mod error;
pub mod hex_bytes;
pub mod incremental;
pub mod membership;
pub mod snapshot;

pub use error::ApiError;
pub use hex_bytes::HexBytes;
pub use incremental::{IncrementalRequest, IncrementalResponse};
pub use membership::{MembershipDigestRequest, MembershipRequest, MembershipResponse};
pub use snapshot::{EventRequest, SnapshotResponse};

#[cfg(test)]
mod tests;
