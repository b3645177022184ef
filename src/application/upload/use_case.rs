//! Upload Use Case
//!
//! Drives every asset through its pipeline, in manifest order:
//! 1. Skip assets the ledger already marks `pushed`
//! 2. Resolve the asset file in the directory
//! 3. Mark the asset `in_progress` (flushed)
//! 4. Load/tag/push (images) or digest/key/copy (packages)
//! 5. Record `pushed` or `failed` (flushed), then clean up
//!
//! Per-asset failures never stop the batch. Only a ledger write failure
//! aborts the run.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::application::progress::ProgressStore;
use crate::domain::entities::{Asset, RecordDetail};
use crate::domain::ports::{
    AssetDirectory, CommandOutput, CommandRunner, CommandSpec, ProgressError, ProgressRepository,
    UploadEvent, UploadEventSink,
};
use crate::domain::services::{
    parse_loaded_images, parse_push_digest, resolve, target_for, LoadedImage,
};
use crate::domain::value_objects::{Partition, Phase, Status, Step};

use super::options::{StorageTarget, UploadOptions};
use super::result::{AssetOutcome, AssetReport, UploadReport};

/// A failed pipeline step
#[derive(Debug, Clone, PartialEq, Eq)]
struct StepFailure {
    step: Step,
    error: String,
}

impl StepFailure {
    fn new(step: Step, error: impl Into<String>) -> Self {
        Self {
            step,
            error: error.into(),
        }
    }
}

/// Successful pipeline run for one asset
struct Delivered {
    targets: Vec<String>,
    detail: RecordDetail,
    /// Local references to remove when cleaning up (images only)
    cleanup_refs: Vec<String>,
}

/// Upload use case - runs the load/tag/push pipeline over a batch of assets
pub struct UploadUseCase<R, D>
where
    R: CommandRunner,
    D: AssetDirectory,
{
    runner: R,
    directory: D,
    options: UploadOptions,
}

impl<R, D> UploadUseCase<R, D>
where
    R: CommandRunner,
    D: AssetDirectory,
{
    pub fn new(runner: R, directory: D, options: UploadOptions) -> Self {
        Self {
            runner,
            directory,
            options,
        }
    }

    pub fn options(&self) -> &UploadOptions {
        &self.options
    }

    /// Partition an asset is processed as, or `None` when this run ignores it
    fn partition_for(&self, asset: &Asset) -> Option<Partition> {
        match asset.partition()? {
            Partition::Image => Some(Partition::Image),
            Partition::Package if self.options.storage.is_some() => Some(Partition::Package),
            Partition::Package => None,
        }
    }

    /// Process `assets` in order against the ledger in `store`.
    pub fn execute<P: ProgressRepository>(
        &self,
        assets: &[Asset],
        store: &mut ProgressStore<P>,
        events: &dyn UploadEventSink,
    ) -> Result<UploadReport, ProgressError> {
        let mut report = UploadReport::new(self.options.dry_run);

        let selected: Vec<(&Asset, Partition)> = assets
            .iter()
            .filter_map(|asset| self.partition_for(asset).map(|p| (asset, p)))
            .collect();
        report.ignored = assets.len() - selected.len();
        if report.ignored > 0 {
            tracing::info!(
                "{} asset(s) not handled by this run (packages need `storage.bucket`)",
                report.ignored
            );
        }

        events.on_event(UploadEvent::Started {
            asset_count: selected.len(),
            dry_run: self.options.dry_run,
        });

        for (index, (asset, partition)) in selected.into_iter().enumerate() {
            let outcome = self.process(index, asset, partition, store, events)?;
            report.assets.push(AssetReport {
                id: asset.id().clone(),
                partition,
                outcome,
            });
        }

        events.on_event(UploadEvent::Completed {
            pushed: report.pushed(),
            skipped: report.skipped(),
            failed: report.failed(),
            missing: report.missing(),
            planned: report.planned(),
        });

        Ok(report)
    }

    fn process<P: ProgressRepository>(
        &self,
        index: usize,
        asset: &Asset,
        partition: Partition,
        store: &mut ProgressStore<P>,
        events: &dyn UploadEventSink,
    ) -> Result<AssetOutcome, ProgressError> {
        let id = asset.id();
        let enter = |phase: Phase| {
            events.on_event(UploadEvent::PhaseChanged {
                index,
                id: id.clone(),
                partition,
                phase,
            })
        };

        if store.status_of(asset) == Status::Pushed {
            enter(Phase::Skipped);
            events.on_event(UploadEvent::AssetSkipped {
                index,
                id: id.clone(),
            });
            return Ok(AssetOutcome::Skipped);
        }

        let Some(present) = resolve(asset, &self.directory) else {
            events.on_event(UploadEvent::AssetMissing {
                index,
                id: id.clone(),
                pattern: asset.pattern().to_string(),
            });
            return Ok(AssetOutcome::Missing);
        };
        if present.is_ambiguous() {
            events.on_event(UploadEvent::AssetAmbiguous {
                index,
                id: id.clone(),
                used: display_name(&present.file),
                ignored: present.ignored.iter().map(|p| display_name(p)).collect(),
            });
        }

        enter(Phase::Pending);
        if !self.options.dry_run {
            store.record(asset, Status::InProgress, RecordDetail::default())?;
        }

        let delivered = match partition {
            Partition::Image => self.push_image(asset, &present.file, &enter),
            Partition::Package => match &self.options.storage {
                Some(storage) => self.upload_package(&present.file, storage, &enter),
                None => Err(StepFailure::new(Step::Tag, "storage.bucket not configured")),
            },
        };

        match delivered {
            Ok(delivered) => {
                enter(Phase::Pushed);
                if !self.options.dry_run {
                    store.record(asset, Status::Pushed, delivered.detail.clone())?;
                }
                if self.options.cleanup_after_push {
                    self.cleanup(index, asset, partition, &present.file, &delivered, events);
                }
                if self.options.dry_run {
                    events.on_event(UploadEvent::AssetPlanned {
                        index,
                        id: id.clone(),
                    });
                    return Ok(AssetOutcome::Planned);
                }
                events.on_event(UploadEvent::AssetPushed {
                    index,
                    id: id.clone(),
                    targets: delivered.targets.clone(),
                });
                Ok(AssetOutcome::Pushed {
                    targets: delivered.targets,
                })
            }
            Err(failure) => {
                enter(Phase::Failed);
                if !self.options.dry_run {
                    store.record(asset, Status::Failed, RecordDetail::error(&failure.error))?;
                }
                events.on_event(UploadEvent::AssetFailed {
                    index,
                    id: id.clone(),
                    step: failure.step,
                    error: failure.error.clone(),
                });
                Ok(AssetOutcome::Failed {
                    step: failure.step,
                    error: failure.error,
                })
            }
        }
    }

    /// Run a command; a spawn error or non-zero exit fails `step`.
    fn run(&self, step: Step, command: CommandSpec) -> Result<CommandOutput, StepFailure> {
        let output = self
            .runner
            .run(&command)
            .map_err(|e| StepFailure::new(step, e.to_string()))?;
        if output.is_success() {
            Ok(output)
        } else {
            Err(StepFailure::new(step, output.failure_detail()))
        }
    }

    fn runtime(&self) -> CommandSpec {
        CommandSpec::new(&self.options.tools.runtime)
    }

    fn push_image(
        &self,
        asset: &Asset,
        file: &Path,
        phase: &dyn Fn(Phase),
    ) -> Result<Delivered, StepFailure> {
        let registry = &self.options.registry;

        phase(Phase::Loading);
        let output = self.run(
            Step::Load,
            self.runtime().arg("load").arg("-i").path_arg(file),
        )?;
        let mut loaded = parse_loaded_images(&output.stdout);
        if loaded.is_empty() && self.options.dry_run {
            loaded.push(LoadedImage::Reference(asset.id().key()));
        }
        if loaded.is_empty() {
            return Err(StepFailure::new(
                Step::Load,
                format!(
                    "no image reference in `{} load` output",
                    self.options.tools.runtime
                ),
            ));
        }

        let targets: Vec<String> = loaded
            .iter()
            .map(|image| target_for(&registry.endpoint, &registry.org, image, asset.id()))
            .collect();
        for (image, target) in loaded.iter().zip(&targets) {
            self.run(
                Step::Tag,
                self.runtime().arg("tag").arg(image.source()).arg(target),
            )?;
        }
        phase(Phase::Tagged);

        let mut pushed = None;
        for target in &targets {
            let output = self.run(Step::Push, self.runtime().arg("push").arg(target))?;
            if pushed.is_none() {
                pushed = parse_push_digest(&output.stdout);
            }
        }
        let (digest, pushed_size) = match pushed {
            Some((digest, size)) => (Some(digest), size),
            None => (None, None),
        };

        let mut cleanup_refs = targets.clone();
        for image in &loaded {
            if !cleanup_refs.iter().any(|r| r == image.source()) {
                cleanup_refs.push(image.source().to_string());
            }
        }

        Ok(Delivered {
            detail: RecordDetail {
                error: None,
                digest,
                size: pushed_size.or_else(|| fs::metadata(file).ok().map(|m| m.len())),
                target: Some(targets.join(", ")),
            },
            targets,
            cleanup_refs,
        })
    }

    fn upload_package(
        &self,
        file: &Path,
        storage: &StorageTarget,
        phase: &dyn Fn(Phase),
    ) -> Result<Delivered, StepFailure> {
        phase(Phase::Loading);
        let (digest, size) = if self.options.dry_run {
            (None, None)
        } else {
            let (digest, size) = sha256_file(file)
                .map_err(|e| StepFailure::new(Step::Load, format!("{}: {e}", file.display())))?;
            (Some(digest), Some(size))
        };

        let key = storage.object_key(&display_name(file));
        phase(Phase::Tagged);

        self.run(
            Step::Push,
            CommandSpec::new(&self.options.tools.storage_cli)
                .arg("cp")
                .path_arg(file)
                .arg(&key),
        )?;

        Ok(Delivered {
            detail: RecordDetail {
                error: None,
                digest,
                size,
                target: Some(key.clone()),
            },
            targets: vec![key],
            cleanup_refs: Vec::new(),
        })
    }

    /// Remove local copies after a push. Failures are warnings only.
    fn cleanup(
        &self,
        index: usize,
        asset: &Asset,
        partition: Partition,
        file: &Path,
        delivered: &Delivered,
        events: &dyn UploadEventSink,
    ) {
        let warn = |error: String| {
            events.on_event(UploadEvent::CleanupFailed {
                index,
                id: asset.id().clone(),
                error,
            })
        };

        match partition {
            Partition::Image => {
                for reference in &delivered.cleanup_refs {
                    let command = self.runtime().arg("rmi").arg(reference);
                    match self.runner.run(&command) {
                        Ok(output) if output.is_success() => {}
                        Ok(output) => warn(format!("{command}: {}", output.failure_detail())),
                        Err(e) => warn(e.to_string()),
                    }
                }
            }
            Partition::Package => {
                if self.options.dry_run {
                    tracing::info!("dry run: would remove {}", file.display());
                } else if let Err(e) = fs::remove_file(file) {
                    warn(format!("failed to remove {}: {e}", file.display()));
                }
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `sha256:<hex>` digest and byte size of a file
fn sha256_file(path: &Path) -> std::io::Result<(String, u64)> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    let mut size = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        size += n as u64;
    }
    Ok((format!("sha256:{:x}", hasher.finalize()), size))
}
