//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::json;

use super::OutputFormatter;
use lanpeer_core::discovery::PeerInfo;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_peers(&self, peers: &[PeerInfo]) -> String {
        let output = json!({
            "peers": peers,
            "count": peers.len()
        });
        Self::to_json(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_peer_list_json_shape() {
        let peers = vec![PeerInfo {
            addr: IpAddr::from([10, 0, 0, 2]),
            silent_for_secs: 3.0,
        }];
        let out = JsonOutput::new().format_peers(&peers);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["peers"][0]["addr"], "10.0.0.2");
    }
}
