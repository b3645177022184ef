//! JSON Progress Repository
//!
//! Implements the ProgressRepository port. The ledger is stored as pretty
//! JSON (`.progress.json` by default) so operators can `cat` it during a run.
//! Every save writes a temp file next to the ledger and renames it over the
//! old one, so the file on disk is always a complete snapshot.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::domain::entities::{Ledger, ProgressRecord, RecordDetail};
use crate::domain::ports::{ProgressError, ProgressRepository};
use crate::domain::value_objects::Status;
use crate::error::{StevedoreError, StevedoreResult};

/// Current on-disk format version
pub const LEDGER_VERSION: u32 = 1;

/// Default ledger file name inside the asset directory
pub const DEFAULT_PROGRESS_FILE: &str = ".progress.json";

/// JSON representation of a record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonRecord {
    status: Status,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

/// JSON representation of the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonLedger {
    version: u32,
    #[serde(default)]
    assets: BTreeMap<String, JsonRecord>,
}

/// Accepted on-disk shapes
///
/// The flat legacy shape maps keys straight to `"done"`, `"missing"` or
/// `"failed: <message>"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonLedgerDe {
    Versioned(JsonLedger),
    Legacy(BTreeMap<String, String>),
}

/// JSON-file ledger repository
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProgressRepository;

impl JsonProgressRepository {
    pub fn new() -> Self {
        Self
    }

    /// Parse ledger file content.
    pub fn parse(&self, content: &str, path: &Path) -> Result<Ledger, ProgressError> {
        let parsed: JsonLedgerDe =
            serde_json::from_str(content).map_err(|e| ProgressError::Corrupted {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        match parsed {
            JsonLedgerDe::Versioned(doc) => {
                if doc.version != LEDGER_VERSION {
                    return Err(ProgressError::VersionMismatch {
                        found: doc.version,
                        expected: LEDGER_VERSION,
                    });
                }
                Ok(from_json(doc))
            }
            JsonLedgerDe::Legacy(map) => Ok(from_legacy(map)),
        }
    }

    /// Render the ledger as it is written to disk.
    pub fn render(&self, ledger: &Ledger) -> Result<String, ProgressError> {
        let mut content = serde_json::to_string_pretty(&to_json(ledger)).map_err(|e| {
            ProgressError::Serialization {
                message: e.to_string(),
            }
        })?;
        content.push('\n');
        Ok(content)
    }
}

impl ProgressRepository for JsonProgressRepository {
    fn load(&self, path: &Path) -> Result<Ledger, ProgressError> {
        if !path.exists() {
            return Ok(Ledger::new());
        }

        let content = fs::read_to_string(path).map_err(|e| ProgressError::Access {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(Ledger::new());
        }

        self.parse(&content, path)
    }

    fn save(&self, ledger: &Ledger, path: &Path) -> Result<(), ProgressError> {
        let access = |e: std::io::Error| ProgressError::Access {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let parent = parent_dir(path);
        fs::create_dir_all(parent).map_err(access)?;

        let content = self.render(ledger)?;
        let mut tmp = NamedTempFile::new_in(parent).map_err(access)?;
        tmp.write_all(content.as_bytes()).map_err(access)?;
        tmp.as_file().sync_all().map_err(access)?;
        tmp.persist(path).map_err(|e| access(e.error))?;

        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn from_json(doc: JsonLedger) -> Ledger {
    let mut ledger = Ledger::new();
    for (key, record) in doc.assets {
        ledger.set_record(
            key,
            ProgressRecord::with_timestamp(
                record.status,
                record.updated_at,
                RecordDetail {
                    error: record.error,
                    digest: record.digest,
                    size: record.size,
                    target: record.target,
                },
            ),
        );
    }
    ledger
}

fn from_legacy(map: BTreeMap<String, String>) -> Ledger {
    let mut ledger = Ledger::new();
    for (key, value) in map {
        let record = if value == "done" {
            ProgressRecord::new(Status::Pushed, RecordDetail::default())
        } else if value == "missing" {
            ProgressRecord::new(Status::Skipped, RecordDetail::error("missing"))
        } else if let Some(message) = value.strip_prefix("failed") {
            let message = message.trim_start_matches(':').trim();
            ProgressRecord::new(Status::Failed, RecordDetail::error(message))
        } else {
            tracing::warn!("ignoring unknown legacy progress value '{value}' for {key}");
            continue;
        };
        ledger.set_record(key, record);
    }
    ledger
}

fn to_json(ledger: &Ledger) -> JsonLedger {
    let assets = ledger
        .entries()
        .map(|(key, record)| {
            let detail = record.detail().clone();
            (
                key.to_string(),
                JsonRecord {
                    status: record.status(),
                    updated_at: record.updated_at(),
                    error: detail.error,
                    digest: detail.digest,
                    size: detail.size,
                    target: detail.target,
                },
            )
        })
        .collect();

    JsonLedger {
        version: LEDGER_VERSION,
        assets,
    }
}

/// Advisory lock guarding a ledger against concurrent runs
///
/// Held for the lifetime of the value; released on drop.
#[derive(Debug)]
pub struct LedgerLock {
    file: File,
    path: PathBuf,
}

impl LedgerLock {
    /// Lock file path for a ledger (`.progress.json` → `.progress.lock`)
    pub fn lock_path(ledger_path: &Path) -> PathBuf {
        ledger_path.with_extension("lock")
    }

    /// Take the lock without blocking.
    pub fn acquire(ledger_path: &Path) -> StevedoreResult<Self> {
        let path = Self::lock_path(ledger_path);
        fs::create_dir_all(parent_dir(&path))?;

        let file = File::create(&path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self { file, path }),
            Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
                Err(StevedoreError::LedgerLocked {
                    path: ledger_path.to_path_buf(),
                    lock: path,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LedgerLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
