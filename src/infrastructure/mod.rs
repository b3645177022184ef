//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Asset directory listing and pattern lookup
//! - `repositories/` - JSON progress ledger and its lock
//! - `process/` - Command runners (shell, dry run)
//! - `events/` - Upload event sinks (NDJSON, tracing)

pub mod events;
pub mod fs;
pub mod process;
pub mod repositories;

// Re-export for convenience
pub use events::{JsonEventSink, LogEventSink};
pub use fs::{load_manifest, LocalAssetDirectory};
pub use process::{DryRunRunner, ShellRunner};
pub use repositories::{JsonProgressRepository, LedgerLock};
