//! Liveness registry for discovered peers.
//!
//! Maps peer source IP to the instant of its last recognized message.
//! Entries are created and refreshed only by inbound messages and removed
//! only by the expiry sweep.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Snapshot of one live peer.
#[derive(Debug, Clone, Serialize)]
pub struct PeerInfo {
    /// Peer source IP
    pub addr: IpAddr,
    /// Seconds since the last message from this peer
    pub silent_for_secs: f64,
}

/// The set of currently-live peers with last-seen timestamps.
#[derive(Debug, Default)]
pub struct HostRegistry {
    hosts: HashMap<IpAddr, Instant>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record liveness evidence for `addr`. Returns true when the peer was
    /// not yet tracked.
    pub fn upsert(&mut self, addr: IpAddr, now: Instant) -> bool {
        self.hosts.insert(addr, now).is_none()
    }

    /// Remove every entry silent for longer than `ttl` and return the
    /// removed addresses.
    pub fn sweep(&mut self, now: Instant, ttl: Duration) -> Vec<IpAddr> {
        let expired: Vec<IpAddr> = self
            .hosts
            .iter()
            .filter(|(_, last_seen)| now.duration_since(**last_seen) > ttl)
            .map(|(addr, _)| *addr)
            .collect();

        for addr in &expired {
            self.hosts.remove(addr);
        }

        expired
    }

    pub fn contains(&self, addr: &IpAddr) -> bool {
        self.hosts.contains_key(addr)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Current peers sorted by address.
    pub fn snapshot(&self, now: Instant) -> Vec<PeerInfo> {
        let mut peers: Vec<PeerInfo> = self
            .hosts
            .iter()
            .map(|(addr, last_seen)| PeerInfo {
                addr: *addr,
                silent_for_secs: now.duration_since(*last_seen).as_secs_f64(),
            })
            .collect();
        peers.sort_by_key(|peer| peer.addr);
        peers
    }
}
