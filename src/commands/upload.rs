use std::io;

use anyhow::Result;
use is_terminal::IsTerminal;
use stevedore::application::{ProgressStore, UploadOptions, UploadReport, UploadUseCase};
use stevedore::domain::entities::Asset;
use stevedore::domain::ports::{CommandRunner, FanoutEventSink, UploadEventSink};
use stevedore::infrastructure::{
    DryRunRunner, JsonEventSink, JsonProgressRepository, LedgerLock, LocalAssetDirectory,
    LogEventSink, ShellRunner,
};
use stevedore::presentation::TextRenderer;

use super::RunContext;

pub fn cmd_upload(ctx: &RunContext, dry_run: bool) -> Result<bool> {
    let manifest = ctx.manifest()?;
    for warning in manifest.warnings() {
        tracing::warn!("manifest {warning}");
    }

    let options = ctx.config.upload_options(dry_run)?;
    let directory = LocalAssetDirectory::open(&ctx.asset_dir)?;
    tracing::info!(
        "{} assets in manifest, {} files in {}",
        manifest.assets().len(),
        directory.file_count(),
        ctx.asset_dir.display()
    );

    let log_sink = LogEventSink;
    let json_sink = ctx.is_json().then(JsonEventSink::stdout);
    let mut sinks: Vec<&dyn UploadEventSink> = vec![&log_sink];
    if let Some(json_sink) = &json_sink {
        sinks.push(json_sink);
    }
    let events = FanoutEventSink::new(sinks);

    let report = if dry_run {
        let mut store = ProgressStore::detached(JsonProgressRepository::new(), &ctx.progress_path);
        // Planned commands go to stderr when stdout carries the event stream.
        let runner = if ctx.is_json() {
            DryRunRunner::stderr()
        } else {
            DryRunRunner::stdout()
        };
        run(runner, directory, options, manifest.assets(), &mut store, &events)?
    } else {
        let runtime = &options.tools.runtime;
        if !ShellRunner::is_available(runtime) {
            tracing::warn!("`{runtime}` could not be started; image pushes will fail");
        }
        let _lock = LedgerLock::acquire(&ctx.progress_path)?;
        let mut store = ProgressStore::open(JsonProgressRepository::new(), &ctx.progress_path);
        run(
            ShellRunner::new(),
            directory,
            options,
            manifest.assets(),
            &mut store,
            &events,
        )?
    };

    if !ctx.is_json() {
        let stdout = io::stdout();
        let renderer = TextRenderer::new(stdout.is_terminal(), ctx.verbose);
        renderer.upload(&report, &mut stdout.lock())?;
    }

    Ok(report.is_success())
}

fn run<R: CommandRunner>(
    runner: R,
    directory: LocalAssetDirectory,
    options: UploadOptions,
    assets: &[Asset],
    store: &mut ProgressStore<JsonProgressRepository>,
    events: &dyn UploadEventSink,
) -> Result<UploadReport> {
    let use_case = UploadUseCase::new(runner, directory, options);
    Ok(use_case.execute(assets, store, events)?)
}
