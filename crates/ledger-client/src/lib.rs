mod client;
mod config;
mod error;
mod verify;

pub use client::LedgerClient;
pub use config::Config;
pub use error::{ClientError, Result};
pub use verify::{verify_incremental, verify_membership};

#[cfg(test)]
mod tests;
