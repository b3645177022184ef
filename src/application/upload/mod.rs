//! Upload Module
//!
//! Runs the resumable upload pipeline for a batch of manifest assets.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`UploadOptions`, `RegistryTarget`, `StorageTarget`)
//! - `result` - Result types (`UploadReport`, `AssetOutcome`)
//! - `use_case` - Core use case logic (`UploadUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use stevedore::application::upload::{RegistryTarget, UploadOptions, UploadUseCase};
//!
//! let options = UploadOptions::new(RegistryTarget::new("swr.example.com", "team"));
//! let use_case = UploadUseCase::new(ShellRunner::new(), directory, options);
//! let report = use_case.execute(&assets, &mut store, &LogEventSink)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{RegistryTarget, StorageTarget, ToolOptions, UploadOptions};
pub use result::{AssetOutcome, AssetReport, UploadReport};
pub use use_case::UploadUseCase;
