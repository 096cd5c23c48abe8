//! Scan command - passive bounded discovery.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;

use lanpeer_core::config::DiscoveryConfig;
use lanpeer_core::discovery::DiscoveryService;

use crate::cli::ScanArgs;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the scan command
pub async fn run_scan(args: ScanArgs, json: bool) -> Result<(), CliError> {
    let config = DiscoveryConfig {
        group: args.group,
        port: args.port,
        ..DiscoveryConfig::default()
    };

    let filter = args.filter.as_deref().map(compile_filter).transpose()?;

    let bar = (!json).then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} Scanning for peers... {elapsed}").unwrap(),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        bar
    });

    let mut peers = DiscoveryService::scan(&config, Duration::from_secs(args.duration)).await?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    if let Some(filter) = &filter {
        peers.retain(|peer| filter.is_match(&peer.addr.to_string()));
    }

    let formatter = get_formatter(json);
    println!("{}", formatter.format_peers(&peers));

    if peers.is_empty() {
        return Err(CliError::NoPeersFound);
    }

    Ok(())
}

/// Translate a glob like "192.168.1.*" into an anchored regex.
fn compile_filter(pattern: &str) -> Result<Regex, CliError> {
    let regex_pattern = pattern
        .replace('.', r"\.")
        .replace('*', ".*")
        .replace('?', ".");
    Regex::new(&format!("^{}$", regex_pattern))
        .map_err(|_| CliError::InvalidArgument(format!("Invalid filter pattern: {}", pattern)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_subnet_glob() {
        let filter = compile_filter("192.168.1.*").unwrap();
        assert!(filter.is_match("192.168.1.42"));
        assert!(!filter.is_match("192.168.2.42"));
        // dots are literal, not wildcards
        assert!(!filter.is_match("192x168x1x42"));
    }

    #[test]
    fn test_filter_question_mark_matches_one_char() {
        let filter = compile_filter("10.0.0.?").unwrap();
        assert!(filter.is_match("10.0.0.7"));
        assert!(!filter.is_match("10.0.0.77"));
    }
}
