//! Ledger status of an asset

use serde::{Deserialize, Serialize};

/// Persisted status of an asset in the progress ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Known but not attempted yet
    #[default]
    Pending,
    /// An attempt started and has not finished
    InProgress,
    /// Uploaded; later runs skip it
    Pushed,
    /// Last attempt failed; retried on the next run
    Failed,
    /// Not attempted (file was missing)
    Skipped,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Pushed => "pushed",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
        }
    }

    /// Whether an asset with this status still needs processing
    pub fn needs_processing(&self) -> bool {
        !matches!(self, Status::Pushed)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
