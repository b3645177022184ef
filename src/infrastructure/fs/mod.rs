//! File System Implementations
//!
//! Asset directory listing (the AssetDirectory port) and manifest loading.

mod asset_dir;
mod manifest_file;

pub use asset_dir::{LocalAssetDirectory, SIGNATURE_SUFFIXES};
pub use manifest_file::load_manifest;
