//! Multicast peer discovery protocol.
//!
//! Provides payload classification, the liveness registry, the protocol
//! state machine, and the loop service that drives them.

pub mod engine;
pub mod protocol;
pub mod registry;
pub mod service;

pub use engine::{Action, DiscoveryEngine, Event, Transition};
pub use registry::{HostRegistry, PeerInfo};
pub use service::DiscoveryService;
