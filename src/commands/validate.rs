use std::io;

use anyhow::Result;
use is_terminal::IsTerminal;
use stevedore::domain::services::validate_manifest;
use stevedore::infrastructure::LocalAssetDirectory;
use stevedore::presentation::{JsonRenderer, OutputFormat, TextRenderer};

use super::RunContext;

/// Pre-flight check: every manifest line must have a file, including lines
/// that name no asset identity. Registry settings are not needed here.
pub fn cmd_validate(ctx: &RunContext) -> Result<bool> {
    let manifest = ctx.manifest()?;
    let directory = LocalAssetDirectory::open(&ctx.asset_dir)?;
    let report = validate_manifest(&manifest, &directory);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match ctx.format {
        OutputFormat::Json => JsonRenderer.validation(&report, manifest.warnings(), &mut out)?,
        OutputFormat::Text => TextRenderer::new(stdout.is_terminal(), ctx.verbose).validation(
            &report,
            manifest.warnings(),
            &mut out,
        )?,
    }

    Ok(report.is_complete())
}
