use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use ledger_crypto::Digest;
use ledger_protocol::{
    EventRequest, HexBytes, IncrementalRequest, IncrementalResponse, MembershipDigestRequest,
    MembershipRequest, MembershipResponse, SnapshotResponse,
};

use crate::config::Config;
use crate::error::{ClientError, Result};

/// One `reqwest::Client`, a fixed `Api-Key` header, and exponential
/// backoff around the underlying request send (not around the server's
/// response status — a 4xx/5xx is a decision, not a transient fault).
pub struct LedgerClient {
    config: Config,
    http: reqwest::Client,
}

impl LedgerClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp> {
        let url = format!("{}{}", self.config.endpoint, path);
        let mut retries = 0u32;

        let response = loop {
            let mut request = self.http.post(&url).json(body);
            if let Some(api_key) = &self.config.api_key {
                request = request.header("Api-Key", api_key);
            }

            match request.send().await {
                Ok(response) => break response,
                Err(err) if retries < 5 => {
                    let delay = Duration::from_millis(10 << retries);
                    tracing::debug!(retries, ?delay, "retrying after transport error: {err}");
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Err(err) => return Err(ClientError::Transport(err)),
            }
        };

        let status = response.status();
        let body_text = response.text().await.unwrap_or_default();

        if status.is_client_error() {
            return Err(ClientError::InvalidRequest {
                status: status.as_u16(),
                body: body_text,
            });
        }
        if status.is_server_error() {
            return Err(ClientError::ServerFailure {
                status: status.as_u16(),
                body: body_text,
            });
        }

        serde_json::from_str(&body_text).map_err(|e| ClientError::InvalidRequest {
            status: status.as_u16(),
            body: format!("malformed response body: {e}"),
        })
    }

    /// Appends `event` and returns the snapshot produced by its insert.
    pub async fn add(&self, event: &[u8]) -> Result<SnapshotResponse> {
        let request = EventRequest {
            event: HexBytes(event.to_vec()),
        };
        self.post("/events", &request).await
    }

    pub async fn membership(&self, key: &[u8], version: u64) -> Result<MembershipResponse> {
        let request = MembershipRequest {
            key: HexBytes(key.to_vec()),
            version,
        };
        self.post("/proofs/membership", &request).await
    }

    pub async fn membership_digest(
        &self,
        key_digest: Digest,
        version: u64,
    ) -> Result<MembershipResponse> {
        let request = MembershipDigestRequest { key_digest, version };
        self.post("/proofs/digest-membership", &request).await
    }

    pub async fn incremental(&self, start: u64, end: u64) -> Result<IncrementalResponse> {
        let request = IncrementalRequest { start, end };
        self.post("/proofs/incremental", &request).await
    }
}
