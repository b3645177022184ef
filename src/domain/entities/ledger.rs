//! Progress ledger entity - per-asset upload status
//!
//! The ledger is the single source of truth for whether an asset needs
//! reprocessing. It's a pure data structure - loading and atomic saving are
//! handled by `ProgressRepository`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{AssetId, InvalidAssetId, Partition, Status};

/// Names the ledger record an asset is tracked under
///
/// Images are keyed `name:tag`. Packages are keyed `package/name:tag`, so an
/// image and a package with the same identity never share a record.
pub trait LedgerKey {
    fn ledger_key(&self) -> String;
}

impl LedgerKey for AssetId {
    fn ledger_key(&self) -> String {
        self.key()
    }
}

impl LedgerKey for str {
    fn ledger_key(&self) -> String {
        self.to_string()
    }
}

/// Ledger key for an identity in `partition`
pub fn partition_key(partition: Option<Partition>, id: &AssetId) -> String {
    match partition {
        Some(Partition::Package) => format!("{}/{}", Partition::Package.as_str(), id.key()),
        _ => id.key(),
    }
}

/// Parse a user-supplied key (`name:tag` or `package/name:tag`) into its
/// canonical ledger form.
pub fn parse_ledger_key(input: &str) -> Result<String, InvalidAssetId> {
    let trimmed = input.trim();
    let package_prefix = format!("{}/", Partition::Package.as_str());
    match trimmed.strip_prefix(&package_prefix) {
        Some(rest) => {
            let id: AssetId = rest.parse().map_err(|_| InvalidAssetId(input.to_string()))?;
            Ok(partition_key(Some(Partition::Package), &id))
        }
        None => Ok(trimmed.parse::<AssetId>()?.key()),
    }
}

/// Optional details attached to a status transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDetail {
    /// Captured error output of the failing step
    pub error: Option<String>,
    /// Digest reported by the registry (images) or computed locally (packages)
    pub digest: Option<String>,
    /// Size in bytes: the registry-reported manifest size that goes with
    /// `digest` when the push printed one, otherwise the local file size
    pub size: Option<u64>,
    /// Remote reference the asset was pushed to
    pub target: Option<String>,
}

impl RecordDetail {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// One ledger record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    status: Status,
    updated_at: DateTime<Utc>,
    detail: RecordDetail,
}

impl ProgressRecord {
    /// New record stamped with the current time
    pub fn new(status: Status, detail: RecordDetail) -> Self {
        Self::with_timestamp(status, Utc::now(), detail)
    }

    pub fn with_timestamp(status: Status, updated_at: DateTime<Utc>, detail: RecordDetail) -> Self {
        Self {
            status,
            updated_at,
            detail,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn detail(&self) -> &RecordDetail {
        &self.detail
    }

    pub fn error(&self) -> Option<&str> {
        self.detail.error.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.detail.digest.as_deref()
    }

    pub fn size(&self) -> Option<u64> {
        self.detail.size
    }

    pub fn target(&self) -> Option<&str> {
        self.detail.target.as_deref()
    }
}

/// Mapping of ledger key (see [`LedgerKey`]) to its progress record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: BTreeMap<String, ProgressRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get<K: LedgerKey + ?Sized>(&self, key: &K) -> Option<&ProgressRecord> {
        self.records.get(&key.ledger_key())
    }

    /// Status of an asset; absent assets are `Pending`
    pub fn status_of<K: LedgerKey + ?Sized>(&self, key: &K) -> Status {
        self.get(key).map(|r| r.status()).unwrap_or_default()
    }

    /// Record a status transition.
    ///
    /// Returns `false` (and leaves the timestamp alone) when the record
    /// already has the same status and detail.
    pub fn record<K: LedgerKey + ?Sized>(
        &mut self,
        key: &K,
        status: Status,
        detail: RecordDetail,
    ) -> bool {
        let key = key.ledger_key();
        if let Some(existing) = self.records.get(&key) {
            if existing.status == status && existing.detail == detail {
                return false;
            }
        }
        self.records.insert(key, ProgressRecord::new(status, detail));
        true
    }

    /// Insert a `pending` record for an asset the ledger has not seen yet.
    pub fn ensure_pending<K: LedgerKey + ?Sized>(&mut self, key: &K) -> bool {
        let key = key.ledger_key();
        if self.records.contains_key(&key) {
            return false;
        }
        self.records
            .insert(key, ProgressRecord::new(Status::Pending, RecordDetail::default()));
        true
    }

    /// Insert a record as loaded from storage
    pub fn set_record(&mut self, key: impl Into<String>, record: ProgressRecord) {
        self.records.insert(key.into(), record);
    }

    /// Remove one record; the asset reverts to absent/pending.
    pub fn reset<K: LedgerKey + ?Sized>(&mut self, key: &K) -> bool {
        self.records.remove(&key.ledger_key()).is_some()
    }

    /// Remove every record, returning how many were cleared.
    pub fn reset_all(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ProgressRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn count(&self, status: Status) -> usize {
        self.records
            .values()
            .filter(|r| r.status() == status)
            .count()
    }
}
