//! Partition value object - the asset type a manifest section declares
//!
//! - `Image` sections hold container image tarballs (`docker load` + push)
//! - `Package` sections hold operator packages / archives (object storage upload)

use serde::{Deserialize, Serialize};

/// Asset type declared by a manifest section header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    /// Container image tarballs
    Image,
    /// Operator packages and other archives
    Package,
}

impl Partition {
    /// Recognize a section header. Unrecognized headers return `None`.
    pub fn from_header(header: &str) -> Option<Self> {
        let lower = header.to_lowercase();
        if header.contains("镜像") || lower.contains("image") {
            Some(Partition::Image)
        } else if header.contains("算子")
            || header.contains("软件包")
            || lower.contains("operator")
            || lower.contains("package")
        {
            Some(Partition::Package)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Image => "image",
            Partition::Package => "package",
        }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
