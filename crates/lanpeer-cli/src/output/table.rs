//! Table-formatted output for CLI.

use comfy_table::{Cell, ContentArrangement, Table};

use super::OutputFormatter;
use lanpeer_core::discovery::PeerInfo;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_peers(&self, peers: &[PeerInfo]) -> String {
        if peers.is_empty() {
            return "No peers found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Peer", "Last seen"]);

        for peer in peers {
            table.add_row(vec![
                Cell::new(peer.addr.to_string()),
                Cell::new(format_silence(peer.silent_for_secs)),
            ]);
        }

        format!("{}\n\nFound {} peer(s)", table, peers.len())
    }
}

fn format_silence(secs: f64) -> String {
    if secs < 1.0 {
        "just now".to_string()
    } else {
        format!("{:.0}s ago", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_empty_peer_list() {
        let out = TableOutput::new().format_peers(&[]);
        assert_eq!(out, "No peers found.");
    }

    #[test]
    fn test_peer_table_lists_addresses() {
        let peers = vec![
            PeerInfo {
                addr: IpAddr::from([192, 168, 1, 10]),
                silent_for_secs: 0.2,
            },
            PeerInfo {
                addr: IpAddr::from([192, 168, 1, 20]),
                silent_for_secs: 12.0,
            },
        ];
        let out = TableOutput::new().format_peers(&peers);
        assert!(out.contains("192.168.1.10"));
        assert!(out.contains("just now"));
        assert!(out.contains("12s ago"));
        assert!(out.contains("Found 2 peer(s)"));
    }
}
