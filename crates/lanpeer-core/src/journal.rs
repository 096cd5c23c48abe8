//! Append-only journal of received datagrams.
//!
//! One text line per datagram: timestamp, source address, decoded payload.
//! Flushed per write so records survive abrupt exits. File naming and
//! rotation policy belong to the caller; the journal only ever appends to
//! the path it was given.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::JournalError;

/// One-way sink for received-message records.
pub struct MessageJournal {
    path: PathBuf,
    file: File,
}

impl MessageJournal {
    /// Open `path` for appending, creating the file and parent directory as
    /// needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| JournalError::Open {
                    path: path.clone(),
                    source,
                })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| JournalError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self { path, file })
    }

    /// Append one received-datagram record and flush it to disk.
    pub async fn record(&mut self, source: SocketAddr, payload: &[u8]) -> Result<(), JournalError> {
        let line = format_record(Local::now(), source, payload);
        self.file
            .write_all(line.as_bytes())
            .await
            .map_err(JournalError::Write)?;
        self.file.flush().await.map_err(JournalError::Write)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush any buffered output and drop the handle.
    pub async fn close(mut self) -> Result<(), JournalError> {
        self.file.flush().await.map_err(JournalError::Write)
    }
}

/// Record line: `<timestamp>: <source> -> <payload>`. Payload bytes are
/// decoded lossily so binary garbage still journals.
pub fn format_record(timestamp: DateTime<Local>, source: SocketAddr, payload: &[u8]) -> String {
    format!(
        "{}: {} -> {}\n",
        timestamp.format("%a %b %e %H:%M:%S %Y"),
        source,
        String::from_utf8_lossy(payload)
    )
}
