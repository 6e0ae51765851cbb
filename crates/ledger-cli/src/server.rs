use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use ledger_balloon::{BalloonConfig, BalloonCoordinator};
use ledger_crypto::{Hasher, Sha256Hasher};
use ledger_raft::LedgerRaftNode;
use ledger_storage::{MemoryStore, SledStore, Store};

#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8090")]
    listen: SocketAddr,

    /// This node's Raft id. Must be unique within the cluster.
    #[arg(long, default_value = "1")]
    node_id: u64,

    /// Seed a fresh single-node cluster on startup.
    #[arg(long)]
    bootstrap: bool,

    /// Directory for durable (sled-backed) storage; in-memory if omitted.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Required value of the `Api-Key` header; unauthenticated if omitted.
    #[arg(long, env = "LEDGER_API_KEY")]
    api_key: Option<String>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let store: Arc<dyn Store> = match &args.data_dir {
        Some(path) => Arc::new(SledStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };

    let hasher = Sha256Hasher;
    let config = BalloonConfig::for_output_len(hasher.output_len());
    let coordinator = Arc::new(BalloonCoordinator::new(store.clone(), hasher, config)?);

    let node = Arc::new(
        LedgerRaftNode::open(
            args.node_id,
            args.listen.to_string(),
            store,
            coordinator,
            args.bootstrap,
        )
        .await?,
    );

    let router = ledger_server::build_router(node, args.api_key);

    tracing::info!("Listening on {:?}", args.listen);
    ledger_server::serve(router, args.listen).await
}
