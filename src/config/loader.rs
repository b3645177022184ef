//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StevedoreError, StevedoreResult};

use super::types::Config;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StevedoreResult<(Config, Vec<ConfigWarning>)> {
    if !path.exists() {
        return Err(StevedoreError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok((with_env_overrides(Config::default()), Vec::new()));
    }

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = serde_yaml_ng::Deserializer::from_str(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StevedoreError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((with_env_overrides(config), warnings))
}

/// Load `path` if it exists, otherwise defaults (with env overrides)
pub fn load_or_default(path: &Path) -> StevedoreResult<(Config, Vec<ConfigWarning>)> {
    if path.exists() {
        load_with_warnings(path)
    } else {
        tracing::debug!("no config at {}, using defaults", path.display());
        Ok((with_env_overrides(Config::default()), Vec::new()))
    }
}

/// Apply environment variable overrides (STEVEDORE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply overrides from any variable source
pub(crate) fn apply_overrides(
    mut config: Config,
    var: impl Fn(&str) -> Option<String>,
) -> Config {
    // STEVEDORE_REGISTRY_ENDPOINT
    if let Some(endpoint) = var("STEVEDORE_REGISTRY_ENDPOINT") {
        config.registry.endpoint = Some(endpoint);
    }

    // STEVEDORE_REGISTRY_ORG
    if let Some(org) = var("STEVEDORE_REGISTRY_ORG") {
        config.registry.org = Some(org);
    }

    // STEVEDORE_CLEANUP_AFTER_PUSH
    if let Some(val) = var("STEVEDORE_CLEANUP_AFTER_PUSH") {
        let val = val.to_lowercase();
        config.cleanup_after_push = matches!(val.as_str(), "1" | "true" | "yes" | "on");
    }

    // STEVEDORE_RUNTIME
    if let Some(runtime) = var("STEVEDORE_RUNTIME") {
        if !runtime.trim().is_empty() {
            config.tools.runtime = runtime;
        }
    }

    config
}

/// Line of the first `key:` mapping entry, 1-based
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            line.trim_start()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with(':'))
        })
        .map(|i| i + 1)
}

const KNOWN_KEYS: &[&str] = &[
    "assets_file",
    "registry",
    "endpoint",
    "org",
    "storage",
    "bucket",
    "cleanup_after_push",
    "progress_file",
    "tools",
    "runtime",
    "storage_cli",
];

/// Closest known key within edit distance 2
fn suggest_key(unknown: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .map(|known| (edit_distance(unknown, known), *known))
        .min()
        .filter(|(distance, _)| *distance <= 2)
        .map(|(_, known)| known.to_string())
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }

    row[b.len()]
}
