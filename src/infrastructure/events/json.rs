//! JSON Event Sink
//!
//! Outputs upload events as NDJSON for CI/automation consumption.

use crate::domain::ports::{UploadEvent, UploadEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl UploadEventSink for JsonEventSink {
    fn on_event(&self, event: UploadEvent) {
        let json = match event {
            UploadEvent::Started {
                asset_count,
                dry_run,
            } => {
                serde_json::json!({
                    "event": "start",
                    "command": "upload",
                    "asset_count": asset_count,
                    "dry_run": dry_run,
                })
            }

            UploadEvent::PhaseChanged {
                index,
                id,
                partition,
                phase,
            } => {
                serde_json::json!({
                    "event": "phase",
                    "command": "upload",
                    "index": index,
                    "asset": id.key(),
                    "partition": partition.as_str(),
                    "phase": phase.as_str(),
                })
            }

            UploadEvent::AssetSkipped { index, id } => {
                serde_json::json!({
                    "event": "item_skipped",
                    "command": "upload",
                    "index": index,
                    "asset": id.key(),
                    "reason": "already pushed",
                })
            }

            UploadEvent::AssetMissing { index, id, pattern } => {
                serde_json::json!({
                    "event": "item_missing",
                    "command": "upload",
                    "index": index,
                    "asset": id.key(),
                    "pattern": pattern,
                })
            }

            UploadEvent::AssetAmbiguous {
                index,
                id,
                used,
                ignored,
            } => {
                serde_json::json!({
                    "event": "item_ambiguous",
                    "command": "upload",
                    "index": index,
                    "asset": id.key(),
                    "used": used,
                    "ignored": ignored,
                })
            }

            UploadEvent::AssetPushed { index, id, targets } => {
                serde_json::json!({
                    "event": "item_pushed",
                    "command": "upload",
                    "index": index,
                    "asset": id.key(),
                    "targets": targets,
                })
            }

            UploadEvent::AssetPlanned { index, id } => {
                serde_json::json!({
                    "event": "item_planned",
                    "command": "upload",
                    "index": index,
                    "asset": id.key(),
                })
            }

            UploadEvent::AssetFailed {
                index,
                id,
                step,
                error,
            } => {
                serde_json::json!({
                    "event": "item_error",
                    "command": "upload",
                    "index": index,
                    "asset": id.key(),
                    "step": step.as_str(),
                    "error": error,
                })
            }

            UploadEvent::CleanupFailed { index, id, error } => {
                serde_json::json!({
                    "event": "cleanup_error",
                    "command": "upload",
                    "index": index,
                    "asset": id.key(),
                    "error": error,
                })
            }

            UploadEvent::Completed {
                pushed,
                skipped,
                failed,
                missing,
                planned,
            } => {
                let status = if failed == 0 { "success" } else { "partial" };
                serde_json::json!({
                    "event": "complete",
                    "command": "upload",
                    "status": status,
                    "pushed": pushed,
                    "skipped": skipped,
                    "failed": failed,
                    "missing": missing,
                    "planned": planned,
                })
            }
        };

        self.write_event(json);
    }
}
