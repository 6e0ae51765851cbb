use anyhow::Result;
use clap::{Args, Subcommand};

use ledger_client::{verify_incremental, verify_membership, Config, LedgerClient};
use ledger_crypto::{Digest, Sha256Hasher};
use ledger_protocol::SnapshotResponse;

#[derive(Args, Debug)]
pub struct ClientArgs {
    /// Base URL of the server, e.g. http://127.0.0.1:8090
    #[arg(long, env = "LEDGER_ENDPOINT")]
    endpoint: String,

    /// Value of the `Api-Key` header, if the server requires one.
    #[arg(long, env = "LEDGER_API_KEY")]
    api_key: Option<String>,

    #[command(subcommand)]
    command: ClientCommand,
}

#[derive(Args, Debug)]
struct TrustedSnapshot {
    /// Hex-encoded event digest of the snapshot to verify the proof
    /// against. Omit to skip verification and just print the proof.
    #[arg(long)]
    event_digest: Option<String>,

    #[arg(long)]
    history_digest: Option<String>,

    #[arg(long)]
    hyper_digest: Option<String>,
}

impl TrustedSnapshot {
    fn into_response(self, version: u64) -> Result<Option<SnapshotResponse>> {
        let (Some(event), Some(history), Some(hyper)) =
            (self.event_digest, self.history_digest, self.hyper_digest)
        else {
            return Ok(None);
        };
        Ok(Some(SnapshotResponse {
            version,
            event_digest: Digest::new(hex::decode(event)?),
            history_digest: Digest::new(hex::decode(history)?),
            hyper_digest: Digest::new(hex::decode(hyper)?),
        }))
    }
}

#[derive(Subcommand, Debug)]
enum ClientCommand {
    /// Appends a new event and prints the resulting snapshot.
    Add {
        /// Event payload, as a UTF-8 string.
        event: String,
    },
    /// Requests a membership proof for a key, optionally verifying it
    /// against a previously-trusted snapshot.
    Membership {
        key: String,
        #[arg(long)]
        version: u64,
        #[command(flatten)]
        snapshot: TrustedSnapshot,
    },
    /// Requests an incremental (consistency) proof between two
    /// versions, optionally verifying it against two trusted snapshots.
    Incremental {
        #[arg(long)]
        start: u64,
        #[arg(long)]
        end: u64,
        #[command(flatten)]
        start_snapshot: TrustedSnapshot,
        #[command(flatten)]
        end_snapshot: TrustedSnapshot,
    },
}

/// Drives one client subcommand to completion. Returns `Ok(true)` unless
/// a trusted snapshot was supplied and the proof failed to reconstruct
/// it — the caller maps that to the process exit code (0 success, 1
/// verification failure per the CLI's documented contract).
pub async fn run(args: ClientArgs) -> Result<bool> {
    let mut config = Config::new(args.endpoint);
    if let Some(api_key) = args.api_key {
        config = config.with_api_key(api_key);
    }
    let client = LedgerClient::new(config);

    match args.command {
        ClientCommand::Add { event } => {
            let snapshot = client.add(event.as_bytes()).await?;
            print_json(&snapshot)?;
            Ok(true)
        }
        ClientCommand::Membership {
            key,
            version,
            snapshot,
        } => {
            let proof = client.membership(key.as_bytes(), version).await?;
            print_json(&proof)?;
            match snapshot.into_response(version)? {
                Some(snapshot) => Ok(verify_membership(&proof, &snapshot, &Sha256Hasher)),
                None => Ok(true),
            }
        }
        ClientCommand::Incremental {
            start,
            end,
            start_snapshot,
            end_snapshot,
        } => {
            let proof = client.incremental(start, end).await?;
            print_json(&proof)?;
            match (
                start_snapshot.into_response(start)?,
                end_snapshot.into_response(end)?,
            ) {
                (Some(start), Some(end)) => {
                    Ok(verify_incremental(&proof, &start, &end, &Sha256Hasher))
                }
                _ => Ok(true),
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
