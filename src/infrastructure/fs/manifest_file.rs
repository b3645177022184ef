//! Manifest file loading

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::services::{parse_manifest, ParsedManifest};
use crate::error::{StevedoreError, StevedoreResult};

/// Read and parse a manifest file. Parse problems are warnings on the
/// result; only an unreadable file is an error.
pub fn load_manifest(path: &Path) -> StevedoreResult<ParsedManifest> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StevedoreError::ManifestNotFound {
            path: path.to_path_buf(),
        },
        _ => StevedoreError::Io(e),
    })?;

    let manifest = parse_manifest(&text);
    tracing::debug!(
        "{}: {} assets, {} warnings",
        path.display(),
        manifest.assets().len(),
        manifest.warnings().len()
    );
    Ok(manifest)
}
