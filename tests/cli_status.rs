mod common;

use common::*;

#[test]
fn status_without_ledger() {
    let env = TestEnv::builder().build();

    let result = env.run(&["status"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("No progress recorded"));
}

#[test]
fn status_lists_records_and_summary() {
    let env = TestEnv::builder().build();
    env.write_file("assets/.progress.json", LEDGER);

    let result = env.run(&["status"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("mas-api:1.2.0      pushed"), "{}", result.stdout);
    assert!(result.stdout.contains("2025-03-01 08:35:00  exit code 1: denied"));
    assert!(result
        .stdout
        .contains("pushed 1, failed 1, in progress 0, pending 0"));
}

#[test]
fn status_shows_unattempted_manifest_assets_as_pending() {
    let env = TestEnv::builder()
        .with_config(CONFIG)
        .with_manifest(MANIFEST)
        .build();
    env.write_file("assets/.progress.json", LEDGER);

    let result = env.run(&["status", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let events = result.json_lines();
    let assets = &events[0]["assets"];
    assert_eq!(assets["mas-api:1.2.0"]["status"], "pushed");
    assert_eq!(assets["mas-worker:latest"]["status"], "failed");
    assert_eq!(assets["package/operator-pack:2.0.1"]["status"], "pending");
    assert!(assets.get("operator-pack:2.0.1").is_none());
    // Status is read-only.
    assert_eq!(env.status_of("package/operator-pack:2.0.1"), None);
}

#[test]
fn status_reads_legacy_ledger() {
    let env = TestEnv::builder().build();
    env.write_file(
        "assets/.progress.json",
        r#"{"mas-api:1.2.0": "done", "mas-worker:latest": "failed: push denied"}"#,
    );

    let result = env.run(&["status", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let assets = &result.json_lines()[0]["assets"];
    assert_eq!(assets["mas-api:1.2.0"]["status"], "pushed");
    assert_eq!(assets["mas-worker:latest"]["status"], "failed");
}

#[test]
fn status_honours_progress_file_flag() {
    let env = TestEnv::builder().build();
    env.write_file("elsewhere/progress.json", LEDGER);

    let result = env.run(&["status", "--progress-file", "elsewhere/progress.json"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("mas-worker:latest"));
}

#[test]
fn status_fails_on_corrupted_ledger() {
    let env = TestEnv::builder().build();
    env.write_file("assets/.progress.json", "{ not json");

    let result = env.run(&["status"]);

    assert!(!result.success);
    assert!(result.stderr.contains(".progress.json"), "{}", result.stderr);
}
