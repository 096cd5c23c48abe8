//! Discovery configuration.

use std::net::Ipv4Addr;
use std::time::Duration;

/// Default multicast group for peer discovery
pub const DEFAULT_GROUP: Ipv4Addr = Ipv4Addr::new(224, 1, 1, 1);

/// Default UDP discovery port
pub const DEFAULT_PORT: u16 = 5004;

/// Default gap between outgoing group announcements
pub const DEFAULT_ANNOUNCE_INTERVAL: Duration = Duration::from_secs(30);

/// Default silence duration after which a peer is dropped
pub const DEFAULT_HOST_TTL: Duration = Duration::from_secs(30);

/// Default receive timeout - bounds announce and expiry latency
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Default receive buffer size; generous so oversized input never truncates
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 1024 * 1024;

/// Tunables for one discovery participant.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Multicast group to join
    pub group: Ipv4Addr,
    /// UDP port shared by all participants
    pub port: u16,
    /// Minimum gap between outgoing group announcements
    pub announce_interval: Duration,
    /// Silence duration after which a peer is considered departed
    pub host_ttl: Duration,
    /// Upper bound on one blocking receive
    pub recv_timeout: Duration,
    /// Receive buffer size in bytes
    pub recv_buffer_size: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            group: DEFAULT_GROUP,
            port: DEFAULT_PORT,
            announce_interval: DEFAULT_ANNOUNCE_INTERVAL,
            host_ttl: DEFAULT_HOST_TTL,
            recv_timeout: DEFAULT_RECV_TIMEOUT,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
        }
    }
}
