//! ProgressRepository port - abstraction for ledger persistence
//!
//! This trait allows the upload use case to load/save the ledger
//! without knowing about JSON serialization details.

use std::path::{Path, PathBuf};

use crate::domain::entities::Ledger;

/// Ledger persistence errors
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("failed to access progress file {path}: {message}")]
    Access { path: PathBuf, message: String },

    #[error("failed to serialize progress ledger: {message}")]
    Serialization { message: String },

    #[error(
        "progress file corrupted: {path}\n  → Details: {message}\n  → Fix: inspect the file, or run `stevedore reset --all` to start over"
    )]
    Corrupted { path: PathBuf, message: String },

    #[error("progress file format incompatible: found version {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

/// Abstract repository for the progress ledger
pub trait ProgressRepository {
    /// Load the ledger; a missing file is an empty ledger
    fn load(&self, path: &Path) -> Result<Ledger, ProgressError>;

    /// Replace the ledger file atomically
    fn save(&self, ledger: &Ledger, path: &Path) -> Result<(), ProgressError>;

    /// Load the ledger, starting fresh (with a warning) when it is unreadable
    fn load_or_new(&self, path: &Path) -> Ledger {
        match self.load(path) {
            Ok(ledger) => ledger,
            Err(err) => {
                tracing::warn!("{err}");
                tracing::warn!("starting with an empty progress ledger");
                Ledger::new()
            }
        }
    }
}
