//! Log Event Sink
//!
//! Turns upload events into `tracing` records. With a log file configured
//! this produces the timestamped transition log of a run.

use crate::domain::ports::{UploadEvent, UploadEventSink};

/// Event sink that emits every event through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl UploadEventSink for LogEventSink {
    fn on_event(&self, event: UploadEvent) {
        match event {
            UploadEvent::Started {
                asset_count,
                dry_run,
            } => {
                tracing::info!(asset_count, dry_run, "upload started");
            }
            UploadEvent::PhaseChanged {
                id,
                partition,
                phase,
                ..
            } => {
                tracing::info!(asset = %id, %partition, "{phase}");
            }
            UploadEvent::AssetSkipped { id, .. } => {
                tracing::info!(asset = %id, "already pushed, skipping");
            }
            UploadEvent::AssetMissing { id, pattern, .. } => {
                tracing::warn!(asset = %id, "no file matches '{pattern}'");
            }
            UploadEvent::AssetAmbiguous {
                id, used, ignored, ..
            } => {
                tracing::warn!(
                    asset = %id,
                    "several files match, using {used} (ignored: {})",
                    ignored.join(", ")
                );
            }
            UploadEvent::AssetPushed { id, targets, .. } => {
                tracing::info!(asset = %id, "pushed to {}", targets.join(", "));
            }
            UploadEvent::AssetPlanned { id, .. } => {
                tracing::info!(asset = %id, "planned (dry run)");
            }
            UploadEvent::AssetFailed {
                id, step, error, ..
            } => {
                tracing::error!(asset = %id, %step, "{error}");
            }
            UploadEvent::CleanupFailed { id, error, .. } => {
                tracing::warn!(asset = %id, "cleanup failed: {error}");
            }
            UploadEvent::Completed {
                pushed,
                skipped,
                failed,
                missing,
                planned,
            } => {
                tracing::info!(pushed, skipped, failed, missing, planned, "upload finished");
            }
        }
    }
}
