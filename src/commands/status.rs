use std::io;

use anyhow::Result;
use is_terminal::IsTerminal;
use stevedore::domain::ports::ProgressRepository;
use stevedore::infrastructure::JsonProgressRepository;
use stevedore::presentation::{JsonRenderer, OutputFormat, TextRenderer};

use super::RunContext;

/// Show the ledger. Assets listed in the manifest but never attempted are
/// shown as pending when the manifest can be read.
pub fn cmd_status(ctx: &RunContext) -> Result<()> {
    let mut ledger = JsonProgressRepository::new().load(&ctx.progress_path)?;

    if ctx.config.assets_file.is_some() {
        match ctx.manifest() {
            Ok(manifest) => {
                for asset in manifest.assets() {
                    ledger.ensure_pending(asset);
                }
            }
            Err(e) => tracing::debug!("manifest not merged into status: {e}"),
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match ctx.format {
        OutputFormat::Json => JsonRenderer.status(&ledger, &mut out)?,
        OutputFormat::Text => {
            TextRenderer::new(stdout.is_terminal(), ctx.verbose).status(&ledger, &mut out)?
        }
    }
    Ok(())
}
