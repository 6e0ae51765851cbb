mod agent;
mod client;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a ledger node, serving the HTTP API over Raft-replicated state.
    Server(server::ServerArgs),
    /// Talk to a running node: append events, fetch and verify proofs.
    Client(client::ClientArgs),
    /// Long-running companion processes. Not implemented; kept only to
    /// preserve the documented CLI surface.
    Agent {
        #[command(subcommand)]
        kind: agent::AgentArgs,
    },
}

fn init_tracing(verbose: u8) {
    let level_filter = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level_filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Server(args) => server::run(args).await,
        Commands::Client(args) => match client::run(args).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                eprintln!("verification failed");
                std::process::exit(1);
            }
            Err(err) => Err(err),
        },
        Commands::Agent { kind } => agent::run(kind),
    };

    if let Err(err) = outcome {
        eprintln!("error: {err:#}");
        std::process::exit(2);
    }
}
