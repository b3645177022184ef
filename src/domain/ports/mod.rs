//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod asset_directory;
pub mod command_runner;
pub mod progress_repository;
pub mod upload_events;

pub use asset_directory::AssetDirectory;
pub use command_runner::{CommandOutput, CommandRunner, CommandSpec, RunnerError};
pub use progress_repository::{ProgressError, ProgressRepository};
pub use upload_events::{FanoutEventSink, NoopEventSink, UploadEvent, UploadEventSink};
