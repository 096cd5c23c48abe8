//! Error types for the lanpeer CLI.
//!
//! CliError wraps CoreError from the shared library and maps every failure
//! to a process exit code.

use lanpeer_core::error::{CoreError, TransportError};
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No peers found")]
    NoPeersFound,

    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // a failed bind or group join is the one fatal network error
            CliError::Core(CoreError::Transport(TransportError::Open { .. })) => {
                exit_codes::NETWORK_ERROR
            }
            CliError::Core(_) => exit_codes::GENERAL_ERROR,
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::NoPeersFound => exit_codes::GENERAL_ERROR,
            CliError::Other(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    #[test]
    fn test_transport_open_maps_to_network_exit_code() {
        let open = TransportError::Open {
            addr: SocketAddr::from(([0, 0, 0, 0], 5004)),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        let err = CliError::Core(CoreError::Transport(open));
        assert_eq!(err.exit_code(), exit_codes::NETWORK_ERROR);
    }

    #[test]
    fn test_invalid_argument_exit_code() {
        let err = CliError::InvalidArgument("bad filter".to_string());
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);
    }

    #[test]
    fn test_no_peers_is_general_failure() {
        assert_eq!(CliError::NoPeersFound.exit_code(), exit_codes::GENERAL_ERROR);
    }
}
