//! Progress Store
//!
//! Owns the in-memory ledger for one run together with the repository and
//! path it persists to. Every transition that changes the ledger is flushed
//! before the next side effect runs.

use std::path::{Path, PathBuf};

use crate::domain::entities::{Ledger, LedgerKey, RecordDetail};
use crate::domain::ports::{ProgressError, ProgressRepository};
use crate::domain::value_objects::Status;

/// Ledger plus the place it lives
pub struct ProgressStore<R: ProgressRepository> {
    repo: R,
    path: PathBuf,
    ledger: Ledger,
    persistent: bool,
}

impl<R: ProgressRepository> ProgressStore<R> {
    /// Load the ledger at `path`; changes are written back.
    ///
    /// An unreadable ledger is replaced by an empty one (with a warning).
    pub fn open(repo: R, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ledger = repo.load_or_new(&path);
        Self {
            repo,
            path,
            ledger,
            persistent: true,
        }
    }

    /// Load the ledger at `path` read-only: changes stay in memory.
    pub fn detached(repo: R, path: impl Into<PathBuf>) -> Self {
        Self {
            persistent: false,
            ..Self::open(repo, path)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn status_of<K: LedgerKey + ?Sized>(&self, key: &K) -> Status {
        self.ledger.status_of(key)
    }

    /// Record a transition, flushing when the ledger changed.
    pub fn record<K: LedgerKey + ?Sized>(
        &mut self,
        key: &K,
        status: Status,
        detail: RecordDetail,
    ) -> Result<bool, ProgressError> {
        let changed = self.ledger.record(key, status, detail);
        if changed {
            tracing::debug!("{} -> {status}", key.ledger_key());
            self.flush()?;
        }
        Ok(changed)
    }

    /// Remove one record so the asset is processed again.
    pub fn reset<K: LedgerKey + ?Sized>(&mut self, key: &K) -> Result<bool, ProgressError> {
        let removed = self.ledger.reset(key);
        if removed {
            self.flush()?;
        }
        Ok(removed)
    }

    /// Clear the ledger. Always rewrites the file, which also replaces a
    /// corrupted one.
    pub fn reset_all(&mut self) -> Result<usize, ProgressError> {
        let removed = self.ledger.reset_all();
        self.flush()?;
        Ok(removed)
    }

    /// Write the ledger snapshot (no-op when detached).
    pub fn flush(&self) -> Result<(), ProgressError> {
        if self.persistent {
            self.repo.save(&self.ledger, &self.path)?;
        }
        Ok(())
    }
}
