//! Run command - participate in the discovery group until interrupted.

use std::time::Duration;

use colored::*;

use lanpeer_core::config::DiscoveryConfig;
use lanpeer_core::discovery::{DiscoveryService, Event};
use lanpeer_core::error::CoreError;
use lanpeer_core::journal::MessageJournal;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::journal_dir;
use crate::output::get_formatter;

/// Run the participate loop: announce, ack, journal, and print protocol
/// events until Ctrl-C, then print the final peer snapshot.
pub async fn run_participate(args: RunArgs, json: bool, verbose: bool) -> Result<(), CliError> {
    let config = DiscoveryConfig {
        group: args.group,
        port: args.port,
        announce_interval: Duration::from_secs(args.interval),
        host_ttl: Duration::from_secs(args.ttl),
        recv_timeout: Duration::from_millis(args.recv_timeout),
        ..DiscoveryConfig::default()
    };

    let journal = if args.no_journal {
        None
    } else {
        let path = journal_dir::todays_journal_path(args.journal_dir.clone())?;
        let journal = MessageJournal::open(&path).await.map_err(CoreError::from)?;
        println!("Journaling received messages to {}", path.display());
        Some(journal)
    };

    let mut service = DiscoveryService::open(&config, journal)?;

    println!(
        "Joined {}:{} (announce every {}s, peer TTL {}s)",
        args.group, args.port, args.interval, args.ttl
    );
    println!("{}", "Press Ctrl+C to stop".dimmed());

    let peers = service
        .run(
            async {
                let _ = tokio::signal::ctrl_c().await;
            },
            |event| print_event(event, verbose),
        )
        .await?;

    // final snapshot of known peers at exit
    let formatter = get_formatter(json);
    println!("\n{}", formatter.format_peers(&peers));

    Ok(())
}

fn print_event(event: &Event, verbose: bool) {
    match event {
        Event::Announced => {
            println!("{}", "Sent announcement to the group".dimmed());
        }
        Event::PeerDiscovered { addr } => {
            println!("{} {}", "New peer:".green().bold(), addr);
        }
        Event::PeerRefreshed { addr } => {
            if verbose {
                println!("{} {}", "Refreshed:".dimmed(), addr);
            }
        }
        Event::PeerExpired { addr } => {
            println!("{} {}", "Peer expired:".yellow(), addr);
        }
        Event::Unrecognized { source, payload } => {
            println!(
                "{} {} ({} bytes)",
                "Unrecognized message from".red(),
                source,
                payload.len()
            );
        }
    }
}
