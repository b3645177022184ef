//! Output Rendering
//!
//! Human-readable and JSON renderings of run summaries, validation reports
//! and the ledger. Everything renders into a `Write` so the CLI can print to
//! stdout and tests can capture a `Vec<u8>`.

use std::io::{self, Write};

use crate::application::upload::{AssetOutcome, UploadReport};
use crate::domain::entities::Ledger;
use crate::domain::services::{ManifestWarning, ValidationReport};
use crate::domain::value_objects::Status;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    push: &'static str,
    skip: &'static str,
    warn: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            push: "→",
            skip: "○",
            warn: "⚠",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            push: "->",
            skip: "[ ]",
            warn: "[!]",
        }
    }
}

/// Text renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    /// Whether to use unicode icons
    pub unicode: bool,
    /// List every asset, not only the ones needing attention
    pub verbose: bool,
}

impl TextRenderer {
    pub fn new(unicode: bool, verbose: bool) -> Self {
        Self { unicode, verbose }
    }

    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    /// Final summary of an upload run
    pub fn upload(&self, report: &UploadReport, w: &mut dyn Write) -> io::Result<()> {
        let icons = self.icons();

        let title = match (report.dry_run, report.is_success()) {
            (true, true) => format!("{} Dry Run Complete", icons.check),
            (true, false) => format!("{} Dry Run Found Problems", icons.cross),
            (false, true) => format!("{} Upload Complete", icons.check),
            (false, false) => format!("{} Upload Finished With Failures", icons.cross),
        };
        writeln!(w, "{title}")?;
        writeln!(w)?;

        if report.dry_run {
            writeln!(
                w,
                "  planned {}, skipped {}, failed {}, missing {}",
                report.planned(),
                report.skipped(),
                report.failed(),
                report.missing()
            )?;
        } else {
            writeln!(
                w,
                "  pushed {}, skipped {}, failed {}, missing {}",
                report.pushed(),
                report.skipped(),
                report.failed(),
                report.missing()
            )?;
        }
        if report.ignored > 0 {
            writeln!(w, "  {} asset(s) not handled by this run", report.ignored)?;
        }

        if self.verbose {
            let pushed: Vec<_> = report
                .assets
                .iter()
                .filter_map(|a| match &a.outcome {
                    AssetOutcome::Pushed { targets } => Some((a, targets)),
                    _ => None,
                })
                .collect();
            if !pushed.is_empty() {
                writeln!(w)?;
                writeln!(w, "  Pushed ({}):", pushed.len())?;
                for (asset, targets) in pushed {
                    writeln!(w, "    {} {} {}", asset.id, icons.push, targets.join(", "))?;
                }
            }

            let skipped: Vec<_> = report
                .assets
                .iter()
                .filter(|a| a.outcome == AssetOutcome::Skipped)
                .collect();
            if !skipped.is_empty() {
                writeln!(w)?;
                writeln!(w, "  Skipped ({}):", skipped.len())?;
                for asset in skipped {
                    writeln!(w, "    {} {}", icons.skip, asset.id)?;
                }
            }
        }

        let missing: Vec<_> = report
            .assets
            .iter()
            .filter(|a| a.outcome == AssetOutcome::Missing)
            .collect();
        if !missing.is_empty() {
            writeln!(w)?;
            writeln!(w, "  Missing ({}):", missing.len())?;
            for asset in missing {
                writeln!(w, "    {} {}", icons.warn, asset.id)?;
            }
        }

        let failures: Vec<_> = report.failures().collect();
        if !failures.is_empty() {
            writeln!(w)?;
            writeln!(w, "  Failed ({}):", failures.len())?;
            for asset in failures {
                if let AssetOutcome::Failed { step, error } = &asset.outcome {
                    writeln!(w, "    {} {} [{}] {}", icons.cross, asset.id, step, error)?;
                }
            }
        }

        Ok(())
    }

    /// Pre-flight validation report
    pub fn validation(
        &self,
        report: &ValidationReport,
        warnings: &[ManifestWarning],
        w: &mut dyn Write,
    ) -> io::Result<()> {
        let icons = self.icons();

        if !warnings.is_empty() {
            writeln!(w, "Manifest warnings ({}):", warnings.len())?;
            for warning in warnings {
                writeln!(w, "  {} {}", icons.warn, warning)?;
            }
            writeln!(w)?;
        }

        if report.is_complete() {
            writeln!(w, "{} All {} assets present", icons.check, report.total())?;
        } else {
            writeln!(
                w,
                "{} {} of {} assets missing",
                icons.cross,
                report.missing_count(),
                report.total()
            )?;
            writeln!(w)?;
            for asset in &report.missing {
                writeln!(
                    w,
                    "  {} {} ({}, line {}): {}",
                    icons.cross,
                    asset.id(),
                    asset.section(),
                    asset.line(),
                    asset.pattern()
                )?;
            }
            for declared in report.missing_declared() {
                writeln!(
                    w,
                    "  {} {} ({}, line {})",
                    icons.cross, declared.entry.text, declared.entry.section, declared.entry.line
                )?;
            }
        }

        let ambiguous: Vec<_> = report.ambiguous().collect();
        if !ambiguous.is_empty() {
            writeln!(w)?;
            writeln!(w, "  Ambiguous ({}):", ambiguous.len())?;
            for present in ambiguous {
                writeln!(
                    w,
                    "    {} {} uses {} ({} more match)",
                    icons.warn,
                    present.asset.id(),
                    file_name(&present.file),
                    present.ignored.len()
                )?;
            }
        }

        let present_count = report.total() - report.missing_count();
        if self.verbose && present_count > 0 {
            writeln!(w)?;
            writeln!(w, "  Present ({present_count}):")?;
            for present in &report.present {
                writeln!(
                    w,
                    "    {} {} {}",
                    icons.check,
                    present.asset.id(),
                    file_name(&present.file)
                )?;
            }
            for declared in &report.declared {
                if let Some(file) = &declared.file {
                    writeln!(w, "    {} {}", icons.check, file_name(file))?;
                }
            }
        }

        Ok(())
    }

    /// Ledger listing
    pub fn status(&self, ledger: &Ledger, w: &mut dyn Write) -> io::Result<()> {
        if ledger.is_empty() {
            writeln!(w, "No progress recorded")?;
            return Ok(());
        }

        let width = ledger.entries().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, record) in ledger.entries() {
            write!(
                w,
                "{key:<width$}  {:<11}  {}",
                record.status().as_str(),
                record.updated_at().format("%Y-%m-%d %H:%M:%S")
            )?;
            if let Some(error) = record.error() {
                write!(w, "  {error}")?;
            }
            writeln!(w)?;
        }

        writeln!(w)?;
        writeln!(
            w,
            "pushed {}, failed {}, in progress {}, pending {}",
            ledger.count(Status::Pushed),
            ledger.count(Status::Failed),
            ledger.count(Status::InProgress),
            ledger.count(Status::Pending)
        )?;
        Ok(())
    }
}

/// JSON renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn validation(
        &self,
        report: &ValidationReport,
        warnings: &[ManifestWarning],
        w: &mut dyn Write,
    ) -> io::Result<()> {
        let json = serde_json::json!({
            "event": "data",
            "command": "validate",
            "complete": report.is_complete(),
            "present": report.present.iter().map(|p| serde_json::json!({
                "asset": p.asset.id().key(),
                "file": p.file.display().to_string(),
                "ignored": p.ignored.iter().map(|i| i.display().to_string()).collect::<Vec<_>>(),
            })).chain(report.declared.iter().filter_map(|d| d.file.as_ref().map(|file| serde_json::json!({
                "asset": null,
                "file": file.display().to_string(),
                "ignored": [],
            })))).collect::<Vec<_>>(),
            "missing": report.missing.iter().map(|a| serde_json::json!({
                "asset": a.id().key(),
                "pattern": a.pattern(),
                "section": a.section(),
                "line": a.line(),
            })).chain(report.missing_declared().map(|d| serde_json::json!({
                "asset": null,
                "pattern": d.entry.text,
                "section": d.entry.section,
                "line": d.entry.line,
            }))).collect::<Vec<_>>(),
            "warnings": warnings.iter().map(|w| serde_json::json!({
                "line": w.line,
                "text": w.text,
                "reason": w.reason,
            })).collect::<Vec<_>>(),
        });
        writeln!(w, "{json}")
    }

    pub fn status(&self, ledger: &Ledger, w: &mut dyn Write) -> io::Result<()> {
        let assets: serde_json::Map<String, serde_json::Value> = ledger
            .entries()
            .map(|(key, record)| {
                (
                    key.to_string(),
                    serde_json::json!({
                        "status": record.status().as_str(),
                        "updated_at": record.updated_at().to_rfc3339(),
                        "error": record.error(),
                        "digest": record.digest(),
                        "size": record.size(),
                        "target": record.target(),
                    }),
                )
            })
            .collect();
        let json = serde_json::json!({
            "event": "data",
            "command": "status",
            "assets": assets,
        });
        writeln!(w, "{json}")
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::upload::AssetReport;
    use crate::domain::entities::RecordDetail;
    use crate::domain::services::{parse_manifest, validate, validate_manifest};
    use crate::domain::value_objects::{AssetId, Partition, Step};
    use crate::infrastructure::LocalAssetDirectory;
    use insta::assert_snapshot;
    use std::path::Path;

    fn render(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn asset(id: &str, outcome: AssetOutcome) -> AssetReport {
        AssetReport {
            id: id.parse().unwrap(),
            partition: Partition::Image,
            outcome,
        }
    }

    fn mixed_report() -> UploadReport {
        let mut report = UploadReport::new(false);
        report.assets = vec![
            asset(
                "mas-api:1.2.0",
                AssetOutcome::Pushed {
                    targets: vec!["swr.example.com/team/mas-api:1.2.0".to_string()],
                },
            ),
            asset("mas-ui:3.1", AssetOutcome::Skipped),
            asset("mas-gone:9.9", AssetOutcome::Missing),
            asset(
                "mas-db:2.0",
                AssetOutcome::Failed {
                    step: Step::Push,
                    error: "exit code 1: denied".to_string(),
                },
            ),
        ];
        report
    }

    #[test]
    fn output_format_from_flag() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
    }

    #[test]
    fn upload_summary_with_failures() {
        let report = mixed_report();
        let output = render(|w| TextRenderer::new(false, false).upload(&report, w));
        assert_snapshot!("upload_summary_with_failures", output);
    }

    #[test]
    fn upload_summary_verbose_lists_pushed_and_skipped() {
        let report = mixed_report();
        let output = render(|w| TextRenderer::new(true, true).upload(&report, w));

        assert!(output.starts_with("✗ Upload Finished With Failures"));
        assert!(output.contains("  Pushed (1):\n    mas-api:1.2.0 → swr.example.com/team/mas-api:1.2.0\n"));
        assert!(output.contains("  Skipped (1):\n    ○ mas-ui:3.1\n"));
    }

    #[test]
    fn dry_run_summary_counts_planned() {
        let mut report = UploadReport::new(true);
        report.assets = vec![asset("mas-api:1.2.0", AssetOutcome::Planned)];
        report.ignored = 2;

        let output = render(|w| TextRenderer::new(false, false).upload(&report, w));

        assert_eq!(
            output,
            "[OK] Dry Run Complete\n\n  planned 1, skipped 0, failed 0, missing 0\n  2 asset(s) not handled by this run\n"
        );
    }

    #[test]
    fn validation_lists_every_missing_asset() {
        let manifest =
            parse_manifest("# 镜像\nmas-api_1.2.0_x86_64.tar\nmas-db_2.0.tar\nmas-ui_3.1.tar\n");
        let dir = LocalAssetDirectory::from_names(Path::new("/data"), ["mas-api_1.2.0_x86_64.tar"]);
        let report = validate(manifest.assets(), &dir);

        let output = render(|w| TextRenderer::new(false, false).validation(&report, &[], w));

        assert!(output.starts_with("[FAIL] 2 of 3 assets missing\n"));
        assert!(output.contains("  [FAIL] mas-db:2.0 (镜像, line 3): mas-db_2.0.tar\n"));
        assert!(output.contains("  [FAIL] mas-ui:3.1 (镜像, line 4): mas-ui_3.1.tar\n"));
    }

    #[test]
    fn validation_lists_missing_files_without_identity() {
        let manifest = parse_manifest("# 镜像\napp_1.0.tar\n# 算子包\ntool_1.0.rpm\nsetup.run\n");
        let dir = LocalAssetDirectory::from_names(Path::new("/data"), ["app_1.0.tar"]);
        let report = validate_manifest(&manifest, &dir);

        let output = render(|w| TextRenderer::new(false, false).validation(&report, &[], w));
        assert!(output.starts_with("[FAIL] 2 of 3 assets missing\n"), "{output}");
        assert!(output.contains("  [FAIL] tool_1.0.rpm (算子包, line 4)\n"));
        assert!(output.contains("  [FAIL] setup.run (算子包, line 5)\n"));

        let output = render(|w| JsonRenderer.validation(&report, manifest.warnings(), w));
        let json: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(json["complete"], false);
        assert_eq!(json["missing"][0]["asset"], serde_json::Value::Null);
        assert_eq!(json["missing"][1]["pattern"], "setup.run");
    }

    #[test]
    fn validation_json_is_single_object() {
        let manifest = parse_manifest("# 镜像\nmas-api_1.2.0.tar\n");
        let dir = LocalAssetDirectory::from_names(Path::new("/data"), ["mas-api_1.2.0.tar"]);
        let report = validate(manifest.assets(), &dir);

        let output = render(|w| JsonRenderer.validation(&report, manifest.warnings(), w));
        let json: serde_json::Value = serde_json::from_str(output.trim()).unwrap();

        assert_eq!(json["complete"], true);
        assert_eq!(json["present"][0]["asset"], "mas-api:1.2.0");
        assert_eq!(json["missing"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn status_lists_records_with_errors() {
        let mut ledger = Ledger::new();
        ledger.record(
            &AssetId::new("mas-api", "1.2.0"),
            Status::Pushed,
            RecordDetail::default(),
        );
        ledger.record(
            &AssetId::new("mas-db", "2.0"),
            Status::Failed,
            RecordDetail::error("exit code 1: denied"),
        );

        let output = render(|w| TextRenderer::default().status(&ledger, w));

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("mas-api:1.2.0  pushed     "));
        assert!(lines[1].starts_with("mas-db:2.0     failed     "));
        assert!(lines[1].ends_with("  exit code 1: denied"));
        assert_eq!(lines[3], "pushed 1, failed 1, in progress 0, pending 0");
    }

    #[test]
    fn status_empty_ledger() {
        let output = render(|w| TextRenderer::default().status(&Ledger::new(), w));
        assert_eq!(output, "No progress recorded\n");
    }
}
