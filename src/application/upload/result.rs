//! Upload Result
//!
//! Per-asset outcomes and run totals.

use crate::domain::value_objects::{AssetId, Partition, Step};

/// What happened to one asset in this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    /// Pushed/uploaded to these destinations
    Pushed { targets: Vec<String> },
    /// Already pushed in an earlier run
    Skipped,
    /// No matching file in the asset directory
    Missing,
    /// A pipeline step failed
    Failed { step: Step, error: String },
    /// Dry run: every step was planned, nothing was executed
    Planned,
}

/// Outcome of one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub id: AssetId,
    pub partition: Partition,
    pub outcome: AssetOutcome,
}

/// Result of an upload run
#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    /// Outcomes in processing order
    pub assets: Vec<AssetReport>,
    /// Assets not processed by this run (no storage configured, unknown section)
    pub ignored: usize,
    pub dry_run: bool,
}

impl UploadReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    fn count(&self, pred: impl Fn(&AssetOutcome) -> bool) -> usize {
        self.assets.iter().filter(|a| pred(&a.outcome)).count()
    }

    pub fn pushed(&self) -> usize {
        self.count(|o| matches!(o, AssetOutcome::Pushed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, AssetOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, AssetOutcome::Failed { .. }))
    }

    pub fn missing(&self) -> usize {
        self.count(|o| matches!(o, AssetOutcome::Missing))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, AssetOutcome::Planned))
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssetReport> {
        self.assets
            .iter()
            .filter(|a| matches!(a.outcome, AssetOutcome::Failed { .. }))
    }

    /// No asset failed. Missing files do not count as failures.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}
