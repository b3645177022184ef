//! Upload Event Port
//!
//! Provides an observable interface for upload runs.
//! Enables timestamped transition logs, NDJSON event streams, and test recording.

use crate::domain::value_objects::{AssetId, Partition, Phase, Step};

/// Event emitted during an upload run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// Run started
    Started { asset_count: usize, dry_run: bool },

    /// Asset entered a new phase
    PhaseChanged {
        index: usize,
        id: AssetId,
        partition: Partition,
        phase: Phase,
    },

    /// Asset already pushed in an earlier run
    AssetSkipped { index: usize, id: AssetId },

    /// No file in the directory matched the asset's pattern
    AssetMissing {
        index: usize,
        id: AssetId,
        pattern: String,
    },

    /// Several files matched; the first was used
    AssetAmbiguous {
        index: usize,
        id: AssetId,
        used: String,
        ignored: Vec<String>,
    },

    /// Asset reached `Pushed`
    AssetPushed {
        index: usize,
        id: AssetId,
        targets: Vec<String>,
    },

    /// Asset went through every step without side effects (dry run)
    AssetPlanned { index: usize, id: AssetId },

    /// A pipeline step failed
    AssetFailed {
        index: usize,
        id: AssetId,
        step: Step,
        error: String,
    },

    /// Removing the local copy failed after a successful push
    CleanupFailed {
        index: usize,
        id: AssetId,
        error: String,
    },

    /// Run completed
    Completed {
        pushed: usize,
        skipped: usize,
        failed: usize,
        missing: usize,
        planned: usize,
    },
}

/// Trait for receiving upload events
///
/// Implementations can be:
/// - LogEventSink: timestamped log lines
/// - JsonEventSink: NDJSON event stream for automation
/// - NoopEventSink: Silent operation
pub trait UploadEventSink {
    /// Handle an upload event
    fn on_event(&self, event: UploadEvent);
}

impl<T: UploadEventSink + ?Sized> UploadEventSink for &T {
    fn on_event(&self, event: UploadEvent) {
        (**self).on_event(event)
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl UploadEventSink for NoopEventSink {
    fn on_event(&self, _event: UploadEvent) {}
}

/// Fan events out to several sinks
pub struct FanoutEventSink<'a> {
    sinks: Vec<&'a dyn UploadEventSink>,
}

impl<'a> FanoutEventSink<'a> {
    pub fn new(sinks: Vec<&'a dyn UploadEventSink>) -> Self {
        Self { sinks }
    }
}

impl UploadEventSink for FanoutEventSink<'_> {
    fn on_event(&self, event: UploadEvent) {
        for sink in &self.sinks {
            sink.on_event(event.clone());
        }
    }
}
