//! Asset validator - cross-checks manifest assets against a directory
//!
//! Read-only. Every mismatch is collected; nothing fails fast.

use std::path::PathBuf;

use crate::domain::entities::{Asset, ManifestEntry};
use crate::domain::ports::AssetDirectory;
use crate::domain::services::manifest::ParsedManifest;

/// An asset whose file was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentAsset {
    pub asset: Asset,
    /// The file that will be used
    pub file: PathBuf,
    /// Further matches that were ignored
    pub ignored: Vec<PathBuf>,
}

impl PresentAsset {
    pub fn is_ambiguous(&self) -> bool {
        !self.ignored.is_empty()
    }
}

/// A manifest line with no asset identity, checked as a plain file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredFile {
    pub entry: ManifestEntry,
    /// First (sorted) match, `None` when absent
    pub file: Option<PathBuf>,
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub present: Vec<PresentAsset>,
    pub missing: Vec<Asset>,
    pub declared: Vec<DeclaredFile>,
}

impl ValidationReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.declared.iter().all(|d| d.file.is_some())
    }

    /// Declared files that were not found
    pub fn missing_declared(&self) -> impl Iterator<Item = &DeclaredFile> {
        self.declared.iter().filter(|d| d.file.is_none())
    }

    /// Missing assets plus missing declared files
    pub fn missing_count(&self) -> usize {
        self.missing.len() + self.missing_declared().count()
    }

    /// Every checked manifest line
    pub fn total(&self) -> usize {
        self.present.len() + self.missing.len() + self.declared.len()
    }

    pub fn ambiguous(&self) -> impl Iterator<Item = &PresentAsset> {
        self.present.iter().filter(|p| p.is_ambiguous())
    }
}

/// Resolve one asset to its file. With several matches the first (sorted)
/// one wins and the rest are reported as ignored.
pub fn resolve<D>(asset: &Asset, directory: &D) -> Option<PresentAsset>
where
    D: AssetDirectory + ?Sized,
{
    let mut matches = directory.find(asset.pattern());
    if matches.is_empty() {
        return None;
    }
    matches.sort();
    let file = matches.remove(0);
    Some(PresentAsset {
        asset: asset.clone(),
        file,
        ignored: matches,
    })
}

/// Check every asset against the directory.
pub fn validate<D>(assets: &[Asset], directory: &D) -> ValidationReport
where
    D: AssetDirectory + ?Sized,
{
    let mut report = ValidationReport::default();
    for asset in assets {
        match resolve(asset, directory) {
            Some(present) => report.present.push(present),
            None => report.missing.push(asset.clone()),
        }
    }
    report
}

/// Check every manifest line: assets by identity, and lines that failed
/// naming as plain file patterns.
pub fn validate_manifest<D>(manifest: &ParsedManifest, directory: &D) -> ValidationReport
where
    D: AssetDirectory + ?Sized,
{
    let mut report = validate(manifest.assets(), directory);
    for entry in manifest.unnamed_entries() {
        let mut matches = directory.find(&entry.text);
        matches.sort();
        report.declared.push(DeclaredFile {
            entry: entry.clone(),
            file: matches.into_iter().next(),
        });
    }
    report
}
