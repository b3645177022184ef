//! Stevedore CLI - resumable batch uploader
//!
//! Usage: stevedore [OPTIONS] <COMMAND>
//!
//! Commands:
//!   upload    Load, tag and push every asset in the manifest
//!   validate  Check that every manifest asset has a file
//!   reset     Forget recorded progress
//!   status    Show recorded progress

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::RunContext;

fn main() -> Result<()> {
    let cli = Cli::parse();
    stevedore::logging::init(cli.verbose > 0, cli.log_file.as_deref())?;

    let ok = match &cli.command {
        Commands::Upload { dry_run } => {
            let ctx = RunContext::load(&cli, true)?;
            commands::cmd_upload(&ctx, *dry_run)?
        }
        Commands::Validate => {
            let ctx = RunContext::load(&cli, true)?;
            commands::cmd_validate(&ctx)?
        }
        Commands::Reset { all, assets } => {
            let ctx = RunContext::load(&cli, false)?;
            commands::cmd_reset(&ctx, *all, assets)?;
            true
        }
        Commands::Status => {
            let ctx = RunContext::load(&cli, false)?;
            commands::cmd_status(&ctx)?;
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
