//! Discovery protocol state machine.
//!
//! Pure state transitions: the loop feeds in elapsed time and inbound
//! datagrams, the engine reports observable events plus the sends the loop
//! must perform. Keeping I/O out of the engine makes the protocol rules
//! testable without sockets.

use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};

use crate::config::DiscoveryConfig;
use crate::discovery::protocol::{self, MessageKind};
use crate::discovery::registry::{HostRegistry, PeerInfo};

/// Observable protocol events, in occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An announcement went out to the group.
    Announced,
    /// A not-previously-tracked peer sent a recognized message.
    PeerDiscovered { addr: IpAddr },
    /// An already-tracked peer sent a recognized message.
    PeerRefreshed { addr: IpAddr },
    /// A peer stayed silent past the TTL and was dropped.
    PeerExpired { addr: IpAddr },
    /// A payload matched no known message kind. Dropped, never fatal.
    Unrecognized {
        source: SocketAddr,
        payload: Vec<u8>,
    },
}

/// A send the loop must perform as a result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send the announce payload to the group.
    AnnounceToGroup,
    /// Send the ack payload to one peer.
    AckTo(SocketAddr),
}

/// Events and sends produced by one transition.
#[derive(Debug, Default)]
pub struct Transition {
    pub events: Vec<Event>,
    pub actions: Vec<Action>,
}

/// Protocol state: the host registry and the announce timer. Owned by one
/// loop; no interior locking.
pub struct DiscoveryEngine {
    registry: HostRegistry,
    last_announce: Option<Instant>,
    announce_interval: Duration,
    host_ttl: Duration,
}

impl DiscoveryEngine {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            registry: HostRegistry::new(),
            last_announce: None,
            announce_interval: config.announce_interval,
            host_ttl: config.host_ttl,
        }
    }

    /// Per-iteration housekeeping: fire the announce timer if due, then
    /// sweep expired peers. Runs before the loop blocks on the next
    /// receive, so an announce is never delayed by more than one receive
    /// timeout.
    pub fn tick(&mut self, now: Instant) -> Transition {
        let mut out = Transition::default();

        // No announce yet means the first tick fires immediately, making a
        // late joiner visible without a separate bootstrap step.
        let due = match self.last_announce {
            Some(at) => now.duration_since(at) >= self.announce_interval,
            None => true,
        };
        if due {
            self.last_announce = Some(now);
            out.actions.push(Action::AnnounceToGroup);
            out.events.push(Event::Announced);
        }

        for addr in self.registry.sweep(now, self.host_ttl) {
            out.events.push(Event::PeerExpired { addr });
        }

        out
    }

    /// Apply one inbound datagram.
    ///
    /// Any recognized message counts as liveness evidence. Only announces
    /// are acknowledged; acks never trigger acks.
    pub fn handle_datagram(
        &mut self,
        payload: &[u8],
        source: SocketAddr,
        now: Instant,
    ) -> Transition {
        let mut out = Transition::default();

        match protocol::classify(payload) {
            MessageKind::Announce => {
                self.note_alive(source.ip(), now, &mut out);
                out.actions.push(Action::AckTo(source));
            }
            MessageKind::Ack => {
                self.note_alive(source.ip(), now, &mut out);
            }
            MessageKind::Unrecognized => {
                out.events.push(Event::Unrecognized {
                    source,
                    payload: payload.to_vec(),
                });
            }
        }

        out
    }

    fn note_alive(&mut self, addr: IpAddr, now: Instant, out: &mut Transition) {
        if self.registry.upsert(addr, now) {
            out.events.push(Event::PeerDiscovered { addr });
        } else {
            out.events.push(Event::PeerRefreshed { addr });
        }
    }

    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    /// Current peers sorted by address.
    pub fn snapshot(&self, now: Instant) -> Vec<PeerInfo> {
        self.registry.snapshot(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::protocol::{ACK_PAYLOAD, ANNOUNCE_PAYLOAD};

    fn test_config() -> DiscoveryConfig {
        DiscoveryConfig::default()
    }

    fn peer(last: u8) -> SocketAddr {
        SocketAddr::from(([10, 0, 0, last], 5004))
    }

    #[test]
    fn test_first_tick_announces_immediately() {
        let mut engine = DiscoveryEngine::new(&test_config());
        let out = engine.tick(Instant::now());
        assert!(out.actions.contains(&Action::AnnounceToGroup));
    }

    #[test]
    fn test_announce_cadence() {
        let mut engine = DiscoveryEngine::new(&test_config());
        let t0 = Instant::now();

        assert_eq!(engine.tick(t0).actions, vec![Action::AnnounceToGroup]);

        // not due again until a full interval has passed
        let out = engine.tick(t0 + Duration::from_secs(29));
        assert!(out.actions.is_empty());

        let out = engine.tick(t0 + Duration::from_secs(30));
        assert_eq!(out.actions, vec![Action::AnnounceToGroup]);
    }

    #[test]
    fn test_announce_from_peer_is_acked_and_recorded() {
        let mut engine = DiscoveryEngine::new(&test_config());
        let now = Instant::now();
        let source = peer(1);

        let out = engine.handle_datagram(ANNOUNCE_PAYLOAD, source, now);

        assert_eq!(out.events, vec![Event::PeerDiscovered { addr: source.ip() }]);
        assert_eq!(out.actions, vec![Action::AckTo(source)]);
        assert!(engine.registry().contains(&source.ip()));
    }

    #[test]
    fn test_ack_never_triggers_ack() {
        let mut engine = DiscoveryEngine::new(&test_config());
        let out = engine.handle_datagram(ACK_PAYLOAD, peer(2), Instant::now());

        assert!(out.actions.is_empty());
        assert!(engine.registry().contains(&peer(2).ip()));
    }

    #[test]
    fn test_repeat_announces_refresh_without_growth() {
        let mut engine = DiscoveryEngine::new(&test_config());
        let t0 = Instant::now();
        let source = peer(3);

        engine.handle_datagram(ANNOUNCE_PAYLOAD, source, t0);
        let out = engine.handle_datagram(ANNOUNCE_PAYLOAD, source, t0 + Duration::from_secs(5));

        assert_eq!(out.events, vec![Event::PeerRefreshed { addr: source.ip() }]);
        assert_eq!(engine.registry().len(), 1);
    }

    #[test]
    fn test_silent_peer_expires_after_ttl() {
        let mut engine = DiscoveryEngine::new(&test_config());
        let t0 = Instant::now();
        let source = peer(4);

        engine.handle_datagram(ANNOUNCE_PAYLOAD, source, t0);
        // prime the announce timer so the late tick only sweeps
        engine.tick(t0);

        let out = engine.tick(t0 + Duration::from_secs(31));
        assert!(out
            .events
            .contains(&Event::PeerExpired { addr: source.ip() }));
        assert!(!engine.registry().contains(&source.ip()));
    }

    #[test]
    fn test_refresh_defers_expiry() {
        let mut engine = DiscoveryEngine::new(&test_config());
        let t0 = Instant::now();
        let source = peer(5);

        engine.handle_datagram(ANNOUNCE_PAYLOAD, source, t0);
        engine.handle_datagram(ACK_PAYLOAD, source, t0 + Duration::from_secs(20));

        let out = engine.tick(t0 + Duration::from_secs(31));
        assert!(!out
            .events
            .contains(&Event::PeerExpired { addr: source.ip() }));
        assert!(engine.registry().contains(&source.ip()));
    }

    #[test]
    fn test_unrecognized_payload_changes_nothing() {
        let mut engine = DiscoveryEngine::new(&test_config());
        let source = peer(6);

        let out = engine.handle_datagram(b"garbage", source, Instant::now());

        assert!(out.actions.is_empty());
        assert_eq!(
            out.events,
            vec![Event::Unrecognized {
                source,
                payload: b"garbage".to_vec(),
            }]
        );
        assert!(engine.registry().is_empty());
    }
}
