//! Error types for the discovery core.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Core error type for discovery operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Datagram transport errors.
///
/// Only `Open` is fatal; everything else is a per-packet failure the loop
/// survives.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to open multicast endpoint on {addr}: {source}")]
    Open {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Send to {dest} failed: {source}")]
    Send {
        dest: SocketAddr,
        source: std::io::Error,
    },

    #[error("Receive failed: {0}")]
    Recv(#[source] std::io::Error),

    #[error("Transport is closed")]
    Closed,
}

/// Message journal errors.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Failed to open journal {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Journal write failed: {0}")]
    Write(#[source] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_open_error_display() {
        let err = TransportError::Open {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5004),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("0.0.0.0:5004"));
        assert!(msg.contains("address in use"));
    }

    #[test]
    fn test_core_error_from_transport_error() {
        let err = CoreError::from(TransportError::Closed);
        assert!(format!("{}", err).contains("Transport is closed"));
    }
}
