pub mod events;
pub mod proof;
pub mod raft;
