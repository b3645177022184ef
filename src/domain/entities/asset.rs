//! Asset entity and the raw manifest entry it is derived from

use super::ledger::{partition_key, LedgerKey};
use crate::domain::services::naming::{identity_from_filename, NamingError};
use crate::domain::value_objects::{AssetId, Partition};

/// A raw, non-empty manifest line together with the section it appeared in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Section header text (`default` before the first header)
    pub section: String,
    /// Partition recognized from the header, if any
    pub partition: Option<Partition>,
    /// 1-based line number in the manifest
    pub line: usize,
    /// Trimmed line content (a filename pattern)
    pub text: String,
}

impl ManifestEntry {
    /// Parse the entry into an asset, using `partition` for entries whose
    /// section was not recognized.
    pub fn to_asset(&self, fallback: Option<Partition>) -> Result<Asset, NamingError> {
        let id = identity_from_filename(&self.text)?;
        Ok(Asset {
            id,
            pattern: self.text.clone(),
            section: self.section.clone(),
            partition: self.partition.or(fallback),
            line: self.line,
        })
    }
}

/// A required asset declared by the manifest
///
/// Immutable once derived; the file it resolves to is looked up per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    id: AssetId,
    pattern: String,
    section: String,
    partition: Option<Partition>,
    line: usize,
}

impl Asset {
    pub fn new(id: AssetId, pattern: impl Into<String>, partition: Partition) -> Self {
        Self {
            id,
            pattern: pattern.into(),
            section: partition.as_str().to_string(),
            partition: Some(partition),
            line: 0,
        }
    }

    pub fn id(&self) -> &AssetId {
        &self.id
    }

    /// Filename pattern as written in the manifest (may contain `xxx` placeholders)
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn partition(&self) -> Option<Partition> {
        self.partition
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

impl LedgerKey for Asset {
    fn ledger_key(&self) -> String {
        partition_key(self.partition, &self.id)
    }
}
