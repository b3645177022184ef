//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

pub mod manifest;
pub mod naming;
pub mod registry_ref;
pub mod validator;

pub use manifest::{manifest_entries, parse_manifest, ManifestWarning, ParsedManifest};
pub use naming::{identity_from_filename, NamingError};
pub use registry_ref::{
    build_target_ref, parse_loaded_images, parse_push_digest, target_for, LoadedImage,
};
pub use validator::{
    resolve, validate, validate_manifest, DeclaredFile, PresentAsset, ValidationReport,
};
