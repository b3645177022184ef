//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `UploadUseCase` - Runs the load/tag/push pipeline over manifest assets
//!
//! ## Services
//!
//! - `ProgressStore` - The run's ledger, flushed after every transition

pub mod progress;
pub mod upload;

pub use progress::ProgressStore;
pub use upload::{
    AssetOutcome, AssetReport, RegistryTarget, StorageTarget, ToolOptions, UploadOptions,
    UploadReport, UploadUseCase,
};
