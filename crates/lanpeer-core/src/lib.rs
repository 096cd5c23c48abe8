//! Core library for multicast peer discovery.
//!
//! Each participant periodically announces itself on a shared multicast
//! group, acknowledges announcements from others, and tracks which peers
//! are currently reachable. Everything here is process-local: the registry
//! starts empty and dies with the process.

pub mod config;
pub mod discovery;
pub mod error;
pub mod journal;
pub mod transport;

pub use config::DiscoveryConfig;
pub use discovery::service::DiscoveryService;
pub use error::{CoreError, Result};
