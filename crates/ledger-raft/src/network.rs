use async_trait::async_trait;
use openraft::error::{InstallSnapshotError, NetworkError, RPCError, RaftError, Unreachable};
use openraft::network::{RPCOption, RaftNetwork, RaftNetworkFactory};
use openraft::raft::{
    AppendEntriesRequest, AppendEntriesResponse, InstallSnapshotRequest, InstallSnapshotResponse,
    VoteRequest, VoteResponse,
};

use crate::types::TypeConfig;

/// Dials peers over plain HTTP. Each cluster member exposes the three Raft
/// RPCs as JSON POST routes alongside its public API (see `ledger-server`'s
/// `/raft/*` routes) — this is intentionally the thinnest layer in the
/// crate; the coordinator and log storage above it carry the real
/// correctness burden.
#[derive(Clone, Default)]
pub struct HttpNetworkFactory {
    client: reqwest::Client,
}

impl HttpNetworkFactory {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RaftNetworkFactory<TypeConfig> for HttpNetworkFactory {
    type Network = HttpNetwork;

    async fn new_client(&mut self, target: u64, node: &openraft::BasicNode) -> Self::Network {
        HttpNetwork {
            client: self.client.clone(),
            target,
            base_url: format!("http://{}", node.addr),
        }
    }
}

pub struct HttpNetwork {
    client: reqwest::Client,
    #[allow(dead_code)]
    target: u64,
    base_url: String,
}

impl HttpNetwork {
    async fn post<Req, Resp, Err>(&self, path: &str, body: &Req) -> Result<Resp, RPCError<u64, openraft::BasicNode, RaftError<u64, Err>>>
    where
        Req: serde::Serialize + Sync,
        Resp: serde::de::DeserializeOwned,
        Err: std::error::Error,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| RPCError::Unreachable(Unreachable::new(&e)))?;

        response
            .json::<Resp>()
            .await
            .map_err(|e| RPCError::Network(NetworkError::new(&e)))
    }
}

#[async_trait]
impl RaftNetwork<TypeConfig> for HttpNetwork {
    async fn append_entries(
        &mut self,
        rpc: AppendEntriesRequest<TypeConfig>,
        _option: RPCOption,
    ) -> Result<AppendEntriesResponse<u64>, RPCError<u64, openraft::BasicNode, RaftError<u64>>>
    {
        self.post("/raft/append-entries", &rpc).await
    }

    async fn install_snapshot(
        &mut self,
        rpc: InstallSnapshotRequest<TypeConfig>,
        _option: RPCOption,
    ) -> Result<
        InstallSnapshotResponse<u64>,
        RPCError<u64, openraft::BasicNode, RaftError<u64, InstallSnapshotError>>,
    > {
        self.post("/raft/install-snapshot", &rpc).await
    }

    async fn vote(
        &mut self,
        rpc: VoteRequest<u64>,
        _option: RPCOption,
    ) -> Result<VoteResponse<u64>, RPCError<u64, openraft::BasicNode, RaftError<u64>>> {
        self.post("/raft/vote", &rpc).await
    }
}
