//! Registry reference helpers
//!
//! Parsing of `docker load` / `docker push` output and construction of the
//! destination reference inside the configured registry organization.

use crate::domain::value_objects::AssetId;

/// An image produced by `docker load`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedImage {
    /// `Loaded image: registry/ns/name:tag`
    Reference(String),
    /// `Loaded image ID: sha256:...` (tarball saved without a name)
    Id(String),
}

impl LoadedImage {
    /// The string `docker tag` / `docker rmi` accept as source
    pub fn source(&self) -> &str {
        match self {
            LoadedImage::Reference(r) => r,
            LoadedImage::Id(id) => id,
        }
    }
}

/// Extract loaded images from `docker load` stdout.
pub fn parse_loaded_images(output: &str) -> Vec<LoadedImage> {
    const REF_PREFIX: &str = "loaded image:";
    const ID_PREFIX: &str = "loaded image id:";

    output
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let lower = trimmed.to_ascii_lowercase();
            if lower.starts_with(ID_PREFIX) {
                let value = trimmed[ID_PREFIX.len()..].trim();
                (!value.is_empty()).then(|| LoadedImage::Id(value.to_string()))
            } else if lower.starts_with(REF_PREFIX) {
                let value = trimmed[REF_PREFIX.len()..].trim();
                (!value.is_empty()).then(|| LoadedImage::Reference(value.to_string()))
            } else {
                None
            }
        })
        .collect()
}

/// Build the destination reference `<endpoint>/<org>/<name:tag>`.
///
/// Any registry host in the loaded reference is dropped together with its
/// first namespace segment; a reference without host keeps only its last
/// path segment.
///
/// `some.registry/ns/name:tag` → `<endpoint>/<org>/name:tag`
pub fn build_target_ref(endpoint: &str, org: &str, loaded_ref: &str) -> String {
    let parts: Vec<&str> = loaded_ref.split('/').collect();
    let name_tag = if parts.len() >= 2 && (parts[0].contains('.') || parts[0].contains(':')) {
        if parts.len() > 2 {
            parts[2..].join("/")
        } else {
            parts[1].to_string()
        }
    } else {
        parts.last().copied().unwrap_or(loaded_ref).to_string()
    };
    format!(
        "{}/{}/{}",
        endpoint.trim_end_matches('/'),
        org.trim_matches('/'),
        name_tag
    )
}

/// Destination for a loaded image. Unnamed images are tagged with the
/// asset identity.
pub fn target_for(endpoint: &str, org: &str, loaded: &LoadedImage, asset: &AssetId) -> String {
    match loaded {
        LoadedImage::Reference(r) => build_target_ref(endpoint, org, r),
        LoadedImage::Id(_) => build_target_ref(endpoint, org, &asset.to_string()),
    }
}

/// Digest and manifest size reported by `docker push`
/// (`latest: digest: sha256:… size: 1234`).
pub fn parse_push_digest(output: &str) -> Option<(String, Option<u64>)> {
    output.lines().rev().find_map(|line| {
        let idx = line.find("digest: ")?;
        let rest = &line[idx + "digest: ".len()..];
        let digest = rest.split_whitespace().next()?;
        if !digest.contains(':') {
            return None;
        }
        let size = rest
            .split("size:")
            .nth(1)
            .and_then(|s| s.split_whitespace().next())
            .and_then(|s| s.parse().ok());
        Some((digest.to_string(), size))
    })
}
