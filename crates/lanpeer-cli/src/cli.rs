//! CLI argument definitions using clap.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// lanpeer - multicast peer discovery for the local network
#[derive(Parser, Debug)]
#[command(name = "lanpeer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (also print refresh and announce events)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Join the discovery group and announce until interrupted
    Run(RunArgs),

    /// Passively listen for peers for a bounded duration, then print them
    Scan(ScanArgs),
}

// ==================== Run ====================

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Multicast group address
    #[arg(long, default_value = "224.1.1.1", env = "LANPEER_GROUP")]
    pub group: Ipv4Addr,

    /// UDP discovery port
    #[arg(long, default_value = "5004", env = "LANPEER_PORT")]
    pub port: u16,

    /// Seconds between group announcements
    #[arg(long, default_value = "30")]
    pub interval: u64,

    /// Seconds of silence before a peer is dropped
    #[arg(long, default_value = "30")]
    pub ttl: u64,

    /// Receive timeout in milliseconds (bounds announce and expiry latency)
    #[arg(long, default_value = "1000")]
    pub recv_timeout: u64,

    /// Directory for received-message journals (default: platform data dir)
    #[arg(long, env = "LANPEER_JOURNAL_DIR")]
    pub journal_dir: Option<PathBuf>,

    /// Disable the received-message journal
    #[arg(long)]
    pub no_journal: bool,
}

// ==================== Scan ====================

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Multicast group address
    #[arg(long, default_value = "224.1.1.1", env = "LANPEER_GROUP")]
    pub group: Ipv4Addr,

    /// UDP discovery port
    #[arg(long, default_value = "5004", env = "LANPEER_PORT")]
    pub port: u16,

    /// Scan duration in seconds
    #[arg(short, long, default_value = "5")]
    pub duration: u64,

    /// Only show peers whose IP matches this glob (e.g. "192.168.1.*")
    #[arg(short, long)]
    pub filter: Option<String>,
}
