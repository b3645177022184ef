//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::upload::{RegistryTarget, StorageTarget, ToolOptions, UploadOptions};
use crate::error::{StevedoreError, StevedoreResult};
use crate::infrastructure::repositories::DEFAULT_PROGRESS_FILE;

use super::loader::{self, ConfigWarning};

/// Container registry configuration (`registry:` or legacy `swr:`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub org: Option<String>,
}

/// Object storage configuration for packages
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default)]
    pub bucket: Option<String>,
}

/// External tool names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolsConfig {
    #[serde(default = "default_runtime")]
    pub runtime: String,

    #[serde(default = "default_storage_cli")]
    pub storage_cli: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            storage_cli: default_storage_cli(),
        }
    }
}

fn default_runtime() -> String {
    "docker".to_string()
}

fn default_storage_cli() -> String {
    "obsutil".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Manifest file, relative to the config file's directory
    #[serde(default)]
    pub assets_file: Option<PathBuf>,

    #[serde(default, alias = "swr")]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub storage: Option<StorageConfig>,

    #[serde(default)]
    pub cleanup_after_push: bool,

    /// Ledger file, relative to the asset directory
    #[serde(default)]
    pub progress_file: Option<PathBuf>,

    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> StevedoreResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StevedoreResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load the file when it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> StevedoreResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(path)
    }

    /// Apply environment variable overrides (STEVEDORE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Manifest path, resolved against the directory holding the config file
    pub fn manifest_path(&self, config_dir: &Path) -> StevedoreResult<PathBuf> {
        let assets_file = self
            .assets_file
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(StevedoreError::MissingConfigField {
                field: "assets_file",
            })?;
        Ok(config_dir.join(assets_file))
    }

    /// Ledger path, resolved against the asset directory
    pub fn progress_path(&self, asset_dir: &Path) -> PathBuf {
        let file = self
            .progress_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRESS_FILE));
        asset_dir.join(file)
    }

    /// Registry destination; both fields are required for uploads
    pub fn require_registry(&self) -> StevedoreResult<RegistryTarget> {
        let endpoint = non_empty(&self.registry.endpoint).ok_or(
            StevedoreError::MissingConfigField {
                field: "registry.endpoint",
            },
        )?;
        let org = non_empty(&self.registry.org)
            .ok_or(StevedoreError::MissingConfigField { field: "registry.org" })?;
        Ok(RegistryTarget::new(endpoint, org))
    }

    /// Storage destination, when a bucket is configured
    pub fn storage_target(&self) -> Option<StorageTarget> {
        self.storage
            .as_ref()
            .and_then(|s| non_empty(&s.bucket))
            .map(StorageTarget::new)
    }

    pub fn tool_options(&self) -> ToolOptions {
        ToolOptions {
            runtime: self.tools.runtime.clone(),
            storage_cli: self.tools.storage_cli.clone(),
        }
    }

    /// Upload options for a run
    pub fn upload_options(&self, dry_run: bool) -> StevedoreResult<UploadOptions> {
        Ok(UploadOptions::new(self.require_registry()?)
            .with_storage(self.storage_target())
            .with_cleanup(self.cleanup_after_push)
            .with_tools(self.tool_options())
            .with_dry_run(dry_run))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
