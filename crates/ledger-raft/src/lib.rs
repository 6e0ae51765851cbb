mod command;
mod error;
mod log_store;
mod network;
mod node;
mod state_machine;
mod types;

pub use command::{LedgerCommand, LedgerResponse};
pub use error::{RaftNodeError, Result};
pub use log_store::MemLogStore;
pub use network::{HttpNetwork, HttpNetworkFactory};
pub use node::LedgerRaftNode;
pub use state_machine::LedgerStateMachine;
pub use types::{Raft, TypeConfig};

#[cfg(test)]
mod tests;
