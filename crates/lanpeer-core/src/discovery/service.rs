//! Discovery loop service.
//!
//! One cooperative loop alternates between a bounded-time receive and
//! housekeeping (announce timer, expiry sweep). Nothing blocks longer than
//! the receive timeout, and all protocol state is touched only from this
//! loop.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::config::DiscoveryConfig;
use crate::discovery::engine::{Action, DiscoveryEngine, Event, Transition};
use crate::discovery::protocol::{self, MessageKind};
use crate::discovery::registry::{HostRegistry, PeerInfo};
use crate::error::Result;
use crate::journal::MessageJournal;
use crate::transport::{MulticastTransport, RecvOutcome};

/// Owns the transport, the protocol engine, and the optional message
/// journal, and drives them from a single loop.
pub struct DiscoveryService {
    transport: MulticastTransport,
    engine: DiscoveryEngine,
    journal: Option<MessageJournal>,
    recv_timeout: Duration,
}

impl DiscoveryService {
    /// Open the multicast endpoint and build the engine. The only fatal
    /// error path; everything after this is contained per-iteration.
    pub fn open(config: &DiscoveryConfig, journal: Option<MessageJournal>) -> Result<Self> {
        let transport = MulticastTransport::open(config.group, config.port, config.recv_buffer_size)?;
        Ok(Self {
            transport,
            engine: DiscoveryEngine::new(config),
            journal,
            recv_timeout: config.recv_timeout,
        })
    }

    /// Run the discovery loop until `shutdown` resolves, calling `on_event`
    /// for every protocol event. Returns the final registry snapshot after
    /// releasing the transport and the journal.
    pub async fn run<S, F>(&mut self, shutdown: S, mut on_event: F) -> Result<Vec<PeerInfo>>
    where
        S: Future<Output = ()>,
        F: FnMut(&Event),
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.step(&mut on_event) => {}
            }
        }

        let peers = self.engine.snapshot(Instant::now());
        self.close().await;
        Ok(peers)
    }

    /// One loop iteration: housekeeping first, then a bounded receive.
    async fn step<F: FnMut(&Event)>(&mut self, on_event: &mut F) {
        let transition = self.engine.tick(Instant::now());
        self.apply(transition, on_event).await;

        match self.transport.recv(self.recv_timeout).await {
            Ok(RecvOutcome::Received { payload, source }) => {
                // every inbound datagram is journaled, recognized or not
                if let Some(journal) = &mut self.journal {
                    if let Err(e) = journal.record(source, &payload).await {
                        eprintln!("Journal write failed: {}", e);
                    }
                }

                let transition = self.engine.handle_datagram(&payload, source, Instant::now());
                self.apply(transition, on_event).await;
            }
            Ok(RecvOutcome::TimedOut) => {}
            Err(e) => {
                // one failed packet must not end the loop
                eprintln!("UDP receive error: {}", e);
            }
        }
    }

    async fn apply<F: FnMut(&Event)>(&mut self, transition: Transition, on_event: &mut F) {
        for event in &transition.events {
            on_event(event);
        }

        for action in transition.actions {
            let result = match action {
                Action::AnnounceToGroup => self.transport.send_group(protocol::ANNOUNCE_PAYLOAD).await,
                Action::AckTo(dest) => self.transport.send_unicast(protocol::ACK_PAYLOAD, dest).await,
            };
            if let Err(e) = result {
                eprintln!("UDP send error: {}", e);
            }
        }
    }

    /// Release the transport and flush the journal. Safe to call twice.
    pub async fn close(&mut self) {
        self.transport.close();
        if let Some(journal) = self.journal.take() {
            if let Err(e) = journal.close().await {
                eprintln!("Journal close failed: {}", e);
            }
        }
    }

    /// Passively collect announcing peers for `duration` and return the
    /// sorted result. Sends nothing, so a diagnostic scan does not perturb
    /// the group.
    pub async fn scan(config: &DiscoveryConfig, duration: Duration) -> Result<Vec<PeerInfo>> {
        let mut transport =
            MulticastTransport::open(config.group, config.port, config.recv_buffer_size)?;
        let mut registry = HostRegistry::new();
        let start = Instant::now();

        loop {
            let remaining = duration.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                break;
            }

            match transport.recv(remaining.min(config.recv_timeout)).await {
                Ok(RecvOutcome::Received { payload, source }) => {
                    if protocol::classify(&payload) != MessageKind::Unrecognized {
                        registry.upsert(source.ip(), Instant::now());
                    }
                }
                Ok(RecvOutcome::TimedOut) => {}
                Err(e) => {
                    eprintln!("UDP receive error: {}", e);
                }
            }
        }

        let peers = registry.snapshot(Instant::now());
        transport.close();
        Ok(peers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_stops_on_shutdown_and_returns_snapshot() {
        let config = DiscoveryConfig {
            port: 0,
            recv_timeout: Duration::from_millis(10),
            ..DiscoveryConfig::default()
        };

        // environments without a multicast route cannot open the endpoint
        let Ok(mut service) = DiscoveryService::open(&config, None) else {
            return;
        };

        let mut announced = false;
        let peers = service
            .run(tokio::time::sleep(Duration::from_millis(50)), |event| {
                if matches!(event, Event::Announced) {
                    announced = true;
                }
            })
            .await
            .unwrap();

        assert!(announced);
        assert!(peers.is_empty());
    }

    #[tokio::test]
    async fn test_scan_of_quiet_group_finds_nothing() {
        let config = DiscoveryConfig {
            port: 0,
            recv_timeout: Duration::from_millis(10),
            ..DiscoveryConfig::default()
        };

        match DiscoveryService::scan(&config, Duration::from_millis(50)).await {
            Ok(peers) => assert!(peers.is_empty()),
            // no multicast-capable interface in this environment
            Err(_) => {}
        }
    }
}
