//! Journal file location.
//!
//! Received-message journals go into one file per calendar day under the
//! platform data directory (overridable). The core journal never rotates;
//! choosing the day's file here at startup is the whole rotation policy.

use std::path::PathBuf;

use chrono::Local;
use directories::ProjectDirs;

use crate::error::CliError;

/// Resolve the journal file path for today: `<dir>/<YYYY-MM-DD>.log`.
pub fn todays_journal_path(dir_override: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let dir = match dir_override {
        Some(dir) => dir,
        None => default_journal_dir()?,
    };
    Ok(dir.join(format!("{}.log", Local::now().format("%Y-%m-%d"))))
}

fn default_journal_dir() -> Result<PathBuf, CliError> {
    let dirs = ProjectDirs::from("", "", "lanpeer")
        .ok_or_else(|| CliError::Other("Could not determine a journal directory".to_string()))?;
    Ok(dirs.data_dir().join("journal"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_dir_gets_per_day_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = todays_journal_path(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(path.parent().unwrap(), dir.path());

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with(".log"));
        // YYYY-MM-DD.log
        assert_eq!(name.len(), "2026-01-01.log".len());
    }
}
