//! AssetDirectory port - where the asset files live
//!
//! Abstracts the working directory so the validator and the upload use case
//! can be tested without touching the file system.

use std::path::{Path, PathBuf};

/// Read-only view of the directory holding the asset files
pub trait AssetDirectory {
    /// Directory root
    fn root(&self) -> &Path;

    /// Files whose names match a manifest pattern.
    ///
    /// Placeholder runs (`xxx`) in the pattern match any text. Detached
    /// signature and checksum files are never returned.
    fn find(&self, pattern: &str) -> Vec<PathBuf>;
}
