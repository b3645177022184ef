//! Stevedore - resumable batch uploader for container images and archives
//!
//! Stevedore reads an asset manifest, checks that every listed file is present,
//! then loads and pushes container images (or uploads archives to object
//! storage) one by one. Per-asset progress is persisted after every step so
//! an interrupted multi-hour transfer resumes where it stopped.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use config::Config;
pub use domain::value_objects::{AssetId, Partition, Status};
pub use error::{StevedoreError, StevedoreResult};
