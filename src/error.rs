//! Error types for Stevedore
//!
//! Library code returns `StevedoreError`; the binary wraps it in `anyhow`.
//! Per-asset failures are never errors at this level: they are recorded in
//! the ledger and surfaced through the upload report instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::ProgressError;

/// Result type alias for Stevedore operations
pub type StevedoreResult<T> = Result<T, StevedoreError>;

/// Main error type for Stevedore operations
#[derive(Error, Debug)]
pub enum StevedoreError {
    /// Config file passed via `--config` does not exist
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Config file exists but is not valid YAML for our schema
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// A required configuration field is missing
    #[error("'{field}' not set in config")]
    MissingConfigField { field: &'static str },

    /// Manifest named by `assets_file` does not exist
    #[error("assets file not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Working directory with the asset files does not exist
    #[error("asset directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Another process holds the ledger lock
    #[error("progress file {path} is in use by another run (lock held on {lock})")]
    LedgerLocked { path: PathBuf, lock: PathBuf },

    /// Ledger could not be written
    #[error(transparent)]
    Progress(#[from] ProgressError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_field() {
        let err = StevedoreError::MissingConfigField {
            field: "registry.endpoint",
        };
        assert_eq!(err.to_string(), "'registry.endpoint' not set in config");
    }

    #[test]
    fn test_error_display_ledger_locked() {
        let err = StevedoreError::LedgerLocked {
            path: PathBuf::from("/data/.progress.json"),
            lock: PathBuf::from("/data/.progress.lock"),
        };
        assert_eq!(
            err.to_string(),
            "progress file /data/.progress.json is in use by another run (lock held on /data/.progress.lock)"
        );
    }
}
