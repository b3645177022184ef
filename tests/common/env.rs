//! Test environment builder for isolated Stevedore testing.
//!
//! Provides `TestEnv` - a temp directory holding `config.yaml`,
//! `manifest.txt` and an `assets/` directory, plus helpers to run the
//! `stevedore` binary against it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables that would leak host settings into a test run
const SCRUBBED_VARS: &[&str] = &[
    "RUST_LOG",
    "STEVEDORE_REGISTRY_ENDPOINT",
    "STEVEDORE_REGISTRY_ORG",
    "STEVEDORE_CLEANUP_AFTER_PUSH",
    "STEVEDORE_RUNTIME",
];

/// Result of running a Stevedore CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON, one value per non-empty line
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("invalid JSON line {l:?}: {e}"))
            })
            .collect()
    }
}

/// Isolated test workspace
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.path("assets").join(name)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.asset_path(".progress.json")
    }

    /// Run stevedore from the workspace root with `-c config.yaml -d assets`
    pub fn run(&self, args: &[&str]) -> TestResult {
        let mut full = args.to_vec();
        full.extend(["-c", "config.yaml", "-d", "assets"]);
        self.run_raw(&full)
    }

    /// Run stevedore from the workspace root with exactly `args`
    pub fn run_raw(&self, args: &[&str]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path()).args(args);
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        let output = cmd.output().expect("Failed to execute stevedore");
        to_result(output)
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        write(&self.path(relative), content);
    }

    pub fn write_asset(&self, name: &str) {
        write(&self.asset_path(name), "layer");
    }

    pub fn read_progress(&self) -> serde_json::Value {
        let text = std::fs::read_to_string(self.progress_path()).expect("progress file missing");
        serde_json::from_str(&text).expect("progress file is not valid JSON")
    }

    /// Status recorded for `key`, if any
    pub fn status_of(&self, key: &str) -> Option<String> {
        self.read_progress()["assets"][key]["status"]
            .as_str()
            .map(str::to_string)
    }

    /// Install the fake `docker` script and point the config at it
    #[cfg(unix)]
    pub fn install_fake_docker(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.path("bin/docker");
        write(&script, super::FAKE_DOCKER);
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();
        script
    }

    /// Lines the fake `docker` recorded
    pub fn docker_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path("bin/calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for `TestEnv`
#[derive(Default)]
pub struct TestEnvBuilder {
    config: Option<String>,
    manifest: Option<String>,
    assets: Vec<String>,
}

impl TestEnvBuilder {
    pub fn with_config(mut self, config: &str) -> Self {
        self.config = Some(config.to_string());
        self
    }

    pub fn with_manifest(mut self, manifest: &str) -> Self {
        self.manifest = Some(manifest.to_string());
        self
    }

    pub fn with_assets(mut self, names: &[&str]) -> Self {
        self.assets.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            root: tempfile::tempdir().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_stevedore")),
        };
        std::fs::create_dir_all(env.path("assets")).expect("Failed to create assets dir");
        if let Some(config) = &self.config {
            env.write_file("config.yaml", config);
        }
        if let Some(manifest) = &self.manifest {
            env.write_file("manifest.txt", manifest);
        }
        for name in &self.assets {
            env.write_asset(name);
        }
        env
    }
}
