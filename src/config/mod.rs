//! Configuration module for Stevedore
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STEVEDORE_*)
//! 3. Config file (`config.yaml` by default)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{Config, RegistryConfig, StorageConfig, ToolsConfig};

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
