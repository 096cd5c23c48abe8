//! lanpeer - multicast peer discovery for the local network.
//!
//! Announces this host's presence on a shared multicast group, tracks which
//! peers are currently reachable, and journals every received datagram.

mod cli;
mod commands;
mod error;
mod journal_dir;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Run(args) => commands::run_participate(args, cli.json, cli.verbose).await,
        Commands::Scan(args) => commands::run_scan(args, cli.json).await,
    }
}
