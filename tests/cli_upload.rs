//! Upload command tests
//!
//! Dry runs need no container runtime. Live runs use a shell script standing
//! in for `docker` and are unix-only.

mod common;

use common::*;

#[test]
fn dry_run_prints_commands_and_leaves_no_ledger() {
    let env = TestEnv::builder()
        .with_config(CONFIG)
        .with_manifest(MANIFEST)
        .with_assets(IMAGE_FILES)
        .build();

    let result = env.run(&["upload", "--dry-run"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("$ docker load -i"), "{}", result.stdout);
    assert!(
        result
            .stdout
            .contains("$ docker push registry.example.com/proj/mas-api:1.2.0"),
        "{}",
        result.stdout
    );
    assert!(result.stdout.contains("Dry Run Complete"));
    assert!(result.stdout.contains("1 asset(s) not handled"));
    assert!(!env.progress_path().exists());
    assert!(!env.asset_path(".progress.lock").exists());
}

#[test]
fn dry_run_reports_missing_files_without_failing() {
    let env = TestEnv::builder()
        .with_config(CONFIG)
        .with_manifest(MANIFEST)
        .with_assets(&["mas-api_1.2.0_x86_64.tar"])
        .build();

    let result = env.run(&["upload", "--dry-run"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Missing (1):"), "{}", result.stdout);
    assert!(result.stdout.contains("mas-worker:latest"));
    assert!(result.stderr.contains("no file matches"));
}

#[test]
fn dry_run_json_streams_events() {
    let env = TestEnv::builder()
        .with_config(CONFIG)
        .with_manifest(MANIFEST)
        .with_assets(IMAGE_FILES)
        .build();

    let result = env.run(&["upload", "--dry-run", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    // Planned commands go to stderr so stdout stays parseable.
    assert!(result.stderr.contains("$ docker load -i"));

    let events = result.json_lines();
    assert_eq!(events.first().unwrap()["event"], "start");
    assert_eq!(events.first().unwrap()["asset_count"], 2);
    let last = events.last().unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["planned"], 2);

    let planned: Vec<_> = events
        .iter()
        .filter(|e| e["event"] == "item_planned")
        .map(|e| e["asset"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(planned, vec!["mas-api:1.2.0", "mas-worker:latest"]);
}

#[test]
fn upload_requires_registry_settings() {
    let env = TestEnv::builder()
        .with_config("assets_file: manifest.txt\nregistry:\n  endpoint: registry.example.com\n")
        .with_manifest(MANIFEST)
        .with_assets(IMAGE_FILES)
        .build();

    let result = env.run(&["upload", "--dry-run"]);

    assert!(!result.success);
    assert!(result.stderr.contains("registry.org"), "{}", result.stderr);
}

#[test]
fn upload_fails_without_config_file() {
    let env = TestEnv::builder().with_manifest(MANIFEST).build();

    let result = env.run(&["upload"]);

    assert!(!result.success);
    assert!(result.stderr.contains("config file not found"), "{}", result.stderr);
}

#[test]
fn upload_fails_without_manifest() {
    let env = TestEnv::builder().with_config(CONFIG).build();

    let result = env.run(&["upload", "--dry-run"]);

    assert!(!result.success);
    assert!(result.stderr.contains("assets file not found"), "{}", result.stderr);
}

#[test]
fn upload_fails_without_asset_directory() {
    let env = TestEnv::builder()
        .with_config(CONFIG)
        .with_manifest(MANIFEST)
        .build();

    let result = env.run_raw(&["upload", "--dry-run", "-c", "config.yaml", "-d", "nowhere"]);

    assert!(!result.success);
    assert!(result.stderr.contains("asset directory not found"), "{}", result.stderr);
}

#[cfg(unix)]
mod live {
    use super::*;

    fn env_with_docker(manifest: &str, assets: &[&str]) -> TestEnv {
        let env = TestEnv::builder()
            .with_manifest(manifest)
            .with_assets(assets)
            .build();
        let docker = env.install_fake_docker();
        env.write_file(
            "config.yaml",
            &format!("{CONFIG}tools:\n  runtime: '{}'\n", docker.display()),
        );
        env
    }

    #[test]
    fn pushes_every_image_and_records_progress() {
        let env = env_with_docker(MANIFEST, IMAGE_FILES);

        let result = env.run(&["upload"]);

        assert!(result.success, "{}", result.combined_output());
        assert!(result.stdout.contains("Upload Complete"), "{}", result.stdout);
        assert_eq!(env.status_of("mas-api:1.2.0").as_deref(), Some("pushed"));
        assert_eq!(env.status_of("mas-worker:latest").as_deref(), Some("pushed"));

        let progress = env.read_progress();
        let record = &progress["assets"]["mas-api:1.2.0"];
        assert_eq!(record["digest"], "sha256:feedface");
        assert_eq!(record["target"], "registry.example.com/proj/mas-api:1.2.0");
        assert_eq!(record["size"], 1234);

        let calls = env.docker_calls();
        assert!(calls
            .iter()
            .any(|c| c == "tag sha256:0123456789ab registry.example.com/proj/mas-api:1.2.0"));
        assert!(calls
            .iter()
            .any(|c| c == "push registry.example.com/proj/mas-worker:latest"));
    }

    #[test]
    fn second_run_skips_pushed_assets() {
        let env = env_with_docker(MANIFEST, IMAGE_FILES);

        assert!(env.run(&["upload"]).success);
        let calls_after_first = env.docker_calls().len();

        let result = env.run(&["upload", "-v"]);

        assert!(result.success, "{}", result.combined_output());
        assert!(result.stdout.contains("pushed 0, skipped 2"), "{}", result.stdout);
        assert!(result.stdout.contains("Skipped (2):"));
        // Only the availability probe ran.
        let new_calls: Vec<_> = env.docker_calls()[calls_after_first..].to_vec();
        assert_eq!(new_calls, vec!["--version"]);
    }

    #[test]
    fn failed_asset_does_not_stop_the_batch() {
        let manifest = "# images\nbroken-app_1.0.0.tar\nmas-api_1.2.0_x86_64.tar\n";
        let env = env_with_docker(manifest, &["broken-app_1.0.0.tar", "mas-api_1.2.0_x86_64.tar"]);

        let result = env.run(&["upload"]);

        assert_eq!(result.exit_code, 1, "{}", result.combined_output());
        assert!(result.stdout.contains("Upload Finished With Failures"));
        assert!(result.stdout.contains("broken-app:1.0.0 [load]"), "{}", result.stdout);
        assert_eq!(env.status_of("broken-app:1.0.0").as_deref(), Some("failed"));
        assert_eq!(env.status_of("mas-api:1.2.0").as_deref(), Some("pushed"));

        let progress = env.read_progress();
        let error = progress["assets"]["broken-app:1.0.0"]["error"]
            .as_str()
            .unwrap();
        assert!(error.contains("unexpected EOF"), "{error}");
    }

    #[test]
    fn json_run_reports_pushed_targets() {
        let env = env_with_docker(MANIFEST, IMAGE_FILES);

        let result = env.run(&["upload", "--json"]);

        assert!(result.success, "{}", result.combined_output());
        let events = result.json_lines();
        let pushed: Vec<_> = events
            .iter()
            .filter(|e| e["event"] == "item_pushed")
            .collect();
        assert_eq!(pushed.len(), 2);
        assert_eq!(
            pushed[0]["targets"],
            serde_json::json!(["registry.example.com/proj/mas-api:1.2.0"])
        );
        assert_eq!(events.last().unwrap()["status"], "success");
    }

    #[test]
    fn cleanup_removes_pushed_images() {
        let env = env_with_docker("# images\nmas-api_1.2.0_x86_64.tar\n", IMAGE_FILES);
        env.write_file(
            "config.yaml",
            &format!(
                "{CONFIG}cleanup_after_push: true\ntools:\n  runtime: '{}'\n",
                env.path("bin/docker").display()
            ),
        );

        let result = env.run(&["upload"]);

        assert!(result.success, "{}", result.combined_output());
        let calls = env.docker_calls();
        assert!(calls
            .iter()
            .any(|c| c == "rmi registry.example.com/proj/mas-api:1.2.0"));
        assert!(calls.iter().any(|c| c == "rmi sha256:0123456789ab"));
    }
}
