use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Stevedore - resumable batch uploader for container images and archives
#[derive(Parser, Debug)]
#[command(name = "stevedore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Directory holding the asset files
    #[arg(short, long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Progress ledger path (overrides `progress_file` in the config)
    #[arg(long, global = true)]
    pub progress_file: Option<PathBuf>,

    /// Also append log lines to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, tag and push every asset in the manifest
    Upload {
        /// Print the commands that would run; the ledger is not touched
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that every manifest asset has a file in the directory
    Validate,

    /// Forget recorded progress so assets are processed again
    Reset {
        /// Clear the whole ledger
        #[arg(long, conflicts_with = "assets", required_unless_present = "assets")]
        all: bool,

        /// Assets to reset (`name:tag`, or `package/name:tag` for packages)
        #[arg(value_name = "NAME:TAG")]
        assets: Vec<String>,
    },

    /// Show recorded progress
    Status,
}
