//! Event Sink Implementations
//!
//! Provides concrete implementations of UploadEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - LogEventSink: `tracing` records for the run log

mod json;
mod log;

pub use json::JsonEventSink;
pub use log::LogEventSink;
