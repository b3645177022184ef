//! Manifest parser
//!
//! A manifest is a plain-text list of asset filenames grouped under `#`
//! section headers:
//!
//! ```text
//! # 镜像
//! mas-api_1.2.0_x86_64.tar
//! mas-worker_xxx_x86_64.tar
//!
//! # 算子包
//! operator-pack_2.0.1.zip
//! ```
//!
//! Parsing never fails on content: unparsable lines become warnings.

use std::collections::HashSet;

use crate::domain::entities::{Asset, ManifestEntry};
use crate::domain::value_objects::Partition;

/// Section name for lines before the first header
pub const DEFAULT_SECTION: &str = "default";

/// A manifest line that could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestWarning {
    pub line: usize,
    pub text: String,
    pub reason: String,
}

impl std::fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: '{}': {}", self.line, self.text, self.reason)
    }
}

/// Result of parsing a manifest
#[derive(Debug, Clone, Default)]
pub struct ParsedManifest {
    assets: Vec<Asset>,
    unnamed: Vec<ManifestEntry>,
    warnings: Vec<ManifestWarning>,
    has_image_section: bool,
}

impl ParsedManifest {
    /// Every parsed asset, in manifest order
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Assets of the image partition, in manifest order
    pub fn image_assets(&self) -> Vec<Asset> {
        self.assets_in(Partition::Image)
    }

    /// Assets of one partition, in manifest order
    pub fn assets_in(&self, partition: Partition) -> Vec<Asset> {
        self.assets
            .iter()
            .filter(|a| a.partition() == Some(partition))
            .cloned()
            .collect()
    }

    /// Lines that declare a file but yield no asset identity (each also
    /// has a warning). Validation still checks these files exist.
    pub fn unnamed_entries(&self) -> &[ManifestEntry] {
        &self.unnamed
    }

    pub fn warnings(&self) -> &[ManifestWarning] {
        &self.warnings
    }

    /// Whether the manifest declared an image section explicitly
    pub fn has_image_section(&self) -> bool {
        self.has_image_section
    }
}

/// Split manifest text into raw entries with their section context.
pub fn manifest_entries(text: &str) -> Vec<ManifestEntry> {
    let mut section = DEFAULT_SECTION.to_string();
    let mut partition = None;
    let mut entries = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim().trim_start_matches('\u{feff}');
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            section = line.trim_start_matches('#').trim().to_string();
            partition = Partition::from_header(&section);
            continue;
        }
        entries.push(ManifestEntry {
            section: section.clone(),
            partition,
            line: index + 1,
            text: line.to_string(),
        });
    }

    entries
}

/// Parse manifest text into assets and warnings.
///
/// When no image section exists, entries of unrecognized sections are
/// treated as images and a warning is recorded. A duplicate identity within
/// one partition keeps its first occurrence; the same identity may appear
/// once per partition.
pub fn parse_manifest(text: &str) -> ParsedManifest {
    let entries = manifest_entries(text);
    let has_image_section = entries
        .iter()
        .any(|e| e.partition == Some(Partition::Image));

    let mut warnings = Vec::new();
    let fallback = if has_image_section {
        None
    } else {
        if !entries.is_empty() {
            warnings.push(ManifestWarning {
                line: 0,
                text: String::new(),
                reason: "no image section found in manifest, treating unlabeled entries as images"
                    .to_string(),
            });
        }
        Some(Partition::Image)
    };

    let mut seen = HashSet::new();
    let mut assets = Vec::new();
    let mut unnamed = Vec::new();
    for entry in &entries {
        match entry.to_asset(fallback) {
            Ok(asset) => {
                if seen.insert((asset.partition(), asset.id().clone())) {
                    assets.push(asset);
                } else {
                    warnings.push(ManifestWarning {
                        line: entry.line,
                        text: entry.text.clone(),
                        reason: format!("duplicate asset {} (first occurrence kept)", asset.id()),
                    });
                }
            }
            Err(err) => {
                warnings.push(ManifestWarning {
                    line: entry.line,
                    text: entry.text.clone(),
                    reason: err.to_string(),
                });
                unnamed.push(entry.clone());
            }
        }
    }

    ParsedManifest {
        assets,
        unnamed,
        warnings,
        has_image_section,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AssetId;

    const MANIFEST: &str = "\
# 镜像
mas-api_1.2.0_x86_64.tar
mas-worker_xxx_x86_64.tar

# 算子包
operator-pack_2.0.1.zip

# 文档
user-guide_1.0.zip
";

    fn ids(assets: &[Asset]) -> Vec<String> {
        assets.iter().map(|a| a.id().to_string()).collect()
    }

    #[test]
    fn image_partition_in_manifest_order() {
        let parsed = parse_manifest(MANIFEST);
        assert_eq!(
            ids(&parsed.image_assets()),
            vec!["mas-api:1.2.0", "mas-worker:latest"]
        );
        assert!(parsed.has_image_section());
        assert!(parsed.warnings().is_empty());
    }

    #[test]
    fn package_partition_is_separate() {
        let parsed = parse_manifest(MANIFEST);
        assert_eq!(
            ids(&parsed.assets_in(Partition::Package)),
            vec!["operator-pack:2.0.1"]
        );
    }

    #[test]
    fn unrecognized_section_is_kept_but_not_partitioned() {
        let parsed = parse_manifest(MANIFEST);
        let guide = parsed
            .assets()
            .iter()
            .find(|a| a.id() == &AssetId::new("user-guide", "1.0"))
            .unwrap();
        assert_eq!(guide.partition(), None);
        assert_eq!(guide.section(), "文档");
    }

    #[test]
    fn line_numbers_are_one_based() {
        let parsed = parse_manifest(MANIFEST);
        assert_eq!(parsed.image_assets()[0].line(), 2);
        assert_eq!(parsed.image_assets()[1].line(), 3);
    }

    #[test]
    fn malformed_lines_become_warnings() {
        let text = "# images\nmas-api_1.0.tar\nsee the wiki for details\nchecksums.txt\nmas-db_2.0.tar\n";
        let parsed = parse_manifest(text);

        assert_eq!(ids(&parsed.image_assets()), vec!["mas-api:1.0", "mas-db:2.0"]);
        assert_eq!(parsed.warnings().len(), 2);
        assert_eq!(parsed.warnings()[0].line, 3);
        assert_eq!(parsed.warnings()[1].text, "checksums.txt");
        let unnamed: Vec<_> = parsed.unnamed_entries().iter().map(|e| e.line).collect();
        assert_eq!(unnamed, vec![3, 4]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let text = "# 镜像\napp_1.0_x86_64.tar\napp_1.0_arm64.tar\n";
        let parsed = parse_manifest(text);

        assert_eq!(parsed.image_assets().len(), 1);
        assert_eq!(parsed.image_assets()[0].pattern(), "app_1.0_x86_64.tar");
        assert!(parsed.warnings()[0].reason.contains("duplicate"));
        assert!(parsed.unnamed_entries().is_empty());
    }

    #[test]
    fn same_identity_in_different_partitions_is_kept() {
        let parsed = parse_manifest("# 算子包\nmas-api_1.0.zip\n\n# 镜像\nmas-api_1.0_x86_64.tar\n");

        assert_eq!(ids(&parsed.image_assets()), vec!["mas-api:1.0"]);
        assert_eq!(ids(&parsed.assets_in(Partition::Package)), vec!["mas-api:1.0"]);
        assert_eq!(parsed.image_assets()[0].pattern(), "mas-api_1.0_x86_64.tar");
        assert!(parsed.warnings().is_empty());
    }

    #[test]
    fn without_image_section_all_unlabeled_entries_are_images() {
        let text = "app_1.0.tar\ndb_2.0.tar\n";
        let parsed = parse_manifest(text);

        assert!(!parsed.has_image_section());
        assert_eq!(ids(&parsed.image_assets()), vec!["app:1.0", "db:2.0"]);
        assert_eq!(parsed.warnings().len(), 1);
    }

    #[test]
    fn header_with_multiple_hashes() {
        let entries = manifest_entries("## Container Images ##\napp_1.0.tar\n");
        assert_eq!(entries[0].section, "Container Images ##");
        assert_eq!(entries[0].partition, Some(Partition::Image));
    }

    #[test]
    fn empty_manifest() {
        let parsed = parse_manifest("\n\n");
        assert!(parsed.assets().is_empty());
        assert!(parsed.warnings().is_empty());
    }
}
