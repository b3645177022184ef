//! Asset identity value object
//!
//! An asset is identified by a `(name, tag)` pair and keyed in the progress
//! ledger as `"name:tag"`.

use std::fmt;
use std::str::FromStr;

/// Identity of an asset: `name:tag`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId {
    name: String,
    tag: String,
}

/// Error returned when a `name:tag` string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid asset identity '{0}' (expected NAME:TAG)")]
pub struct InvalidAssetId(pub String);

impl AssetId {
    /// Tag used when a filename carries no version
    pub const DEFAULT_TAG: &'static str = "latest";

    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Ledger key (`name:tag`)
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

impl FromStr for AssetId {
    type Err = InvalidAssetId;

    /// Parse `name:tag`. The split happens at the last `:`; a bare name gets
    /// the default tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (name, tag) = match trimmed.rsplit_once(':') {
            Some((name, tag)) => (name, tag),
            None => (trimmed, Self::DEFAULT_TAG),
        };

        if name.is_empty() || tag.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(InvalidAssetId(s.to_string()));
        }

        Ok(Self::new(name, tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_ledger_key() {
        let id = AssetId::new("mas-api", "1.2.0");
        assert_eq!(id.to_string(), "mas-api:1.2.0");
        assert_eq!(id.key(), "mas-api:1.2.0");
    }

    #[test]
    fn parse_name_and_tag() {
        let id: AssetId = "mas-api:1.2.0".parse().unwrap();
        assert_eq!(id.name(), "mas-api");
        assert_eq!(id.tag(), "1.2.0");
    }

    #[test]
    fn parse_bare_name_uses_latest() {
        let id: AssetId = "nginx".parse().unwrap();
        assert_eq!(id, AssetId::new("nginx", "latest"));
    }

    #[test]
    fn parse_splits_at_last_colon() {
        let id: AssetId = "localhost:5000/app:2.0".parse().unwrap();
        assert_eq!(id.name(), "localhost:5000/app");
        assert_eq!(id.tag(), "2.0");
    }

    #[test]
    fn parse_rejects_empty_parts() {
        assert!("".parse::<AssetId>().is_err());
        assert!(":1.0".parse::<AssetId>().is_err());
        assert!("app:".parse::<AssetId>().is_err());
        assert!("my app:1.0".parse::<AssetId>().is_err());
    }
}
