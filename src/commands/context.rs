use std::path::{Path, PathBuf};

use anyhow::Result;
use stevedore::config::Config;
use stevedore::domain::services::ParsedManifest;
use stevedore::infrastructure::load_manifest;
use stevedore::presentation::OutputFormat;

use crate::cli::Cli;

/// Settings shared by every command, resolved once from flags and config
#[derive(Debug)]
pub struct RunContext {
    pub config: Config,
    /// Directory the config file lives in; relative manifest paths resolve here
    pub config_dir: PathBuf,
    pub asset_dir: PathBuf,
    pub progress_path: PathBuf,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl RunContext {
    /// Resolve the context. With `require_config` a missing config file is an
    /// error; otherwise defaults are used.
    pub fn load(cli: &Cli, require_config: bool) -> Result<Self> {
        let (config, warnings) = if require_config {
            Config::load_with_warnings(&cli.config)?
        } else {
            Config::load_or_default(&cli.config)?
        };
        for warning in &warnings {
            tracing::warn!("{warning}");
        }

        let progress_path = match &cli.progress_file {
            Some(path) => path.clone(),
            None => config.progress_path(&cli.dir),
        };

        Ok(Self {
            config_dir: config_dir(&cli.config),
            asset_dir: cli.dir.clone(),
            progress_path,
            format: OutputFormat::from_json_flag(cli.json),
            verbose: cli.verbose > 0,
            config,
        })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Read the manifest named by `assets_file`
    pub fn manifest(&self) -> Result<ParsedManifest> {
        let path = self.config.manifest_path(&self.config_dir)?;
        Ok(load_manifest(&path)?)
    }
}

fn config_dir(config: &Path) -> PathBuf {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
