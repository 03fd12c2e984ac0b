//! CLI Integration Tests
//!
//! These tests run the `dais` binary end-to-end against the fixture page.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn cli_cmd() -> Command {
    Command::cargo_bin("dais").expect("Failed to find dais binary")
}

/// Write `contents` to `name` inside a fresh temporary directory
fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write temp file");
    path
}

// ============================================================================
// Countdown Command Tests
// ============================================================================

#[test]
fn test_countdown_at_fixed_instant() {
    cli_cmd()
        .args(["countdown", "--now", "2025-10-22T16:26:56Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("01d 02h 03m 04s"));
}

#[test]
fn test_countdown_far_out_uses_three_digit_days() {
    cli_cmd()
        .args(["countdown", "--now", "2025-05-26T18:30:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("150d 00h 00m 00s"));
}

#[test]
fn test_countdown_after_target_shows_completion_message() {
    cli_cmd()
        .args(["countdown", "--now", "2025-11-01T00:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event Started"));
}

#[test]
fn test_countdown_with_custom_config() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "site.json",
        r#"{"countdown": {"target": "2030-01-01T00:00:00Z", "completion_message": "Doors open"}}"#,
    );

    cli_cmd()
        .arg("--config")
        .arg(&config)
        .args(["countdown", "--now", "2029-12-31T23:59:30Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("00d 00h 00m 30s"));

    cli_cmd()
        .arg("--config")
        .arg(&config)
        .args(["countdown", "--now", "2030-01-02T00:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doors open"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "site.json", r#"{"countdown": {"target": "next friday"}}"#);

    cli_cmd()
        .arg("--config")
        .arg(&config)
        .args(["countdown", "--now", "2025-10-22T16:26:56Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("next friday"));
}

#[test]
fn test_missing_config_fails() {
    cli_cmd()
        .args(["--config", "/nonexistent/site.json", "countdown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_now_conflicts_with_live() {
    cli_cmd()
        .args(["countdown", "--live", "--now", "2025-10-22T16:26:56Z"])
        .assert()
        .failure();
}

// ============================================================================
// Simulate Command Tests
// ============================================================================

#[test]
fn test_simulate_visit() {
    let dir = TempDir::new().unwrap();
    let scenario = write_file(
        &dir,
        "visit.json",
        r#"{
            "start": "2025-10-22T16:26:56Z",
            "steps": [
                "load",
                {"advance": 100},
                {"scroll": 500},
                {"click": ".committee-card[0]"},
                {"advance": 150},
                {"click": ".member-link[1]"},
                {"advance": 150}
            ]
        }"#,
    );

    cli_cmd()
        .arg("simulate")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(predicate::str::contains("Header hidden:  true"))
        .stdout(predicate::str::contains("-> committees/unsc.html"))
        .stdout(predicate::str::contains("-> secretariat/director-general.html"))
        .stdout(predicate::str::contains("(default prevented)"))
        .stdout(predicate::str::contains("Body opacity:   1"));
}

#[test]
fn test_simulate_json_report() {
    let dir = TempDir::new().unwrap();
    let scenario = write_file(
        &dir,
        "menu.json",
        r##"{
            "start": "2025-10-22T16:26:56Z",
            "steps": [{"click": "#hamburger-btn"}, {"advance": 2000}]
        }"##,
    );

    let output = cli_cmd()
        .arg("simulate")
        .arg(&scenario)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["menu_open"], true);
    assert_eq!(report["countdown"], "01d 02h 03m 02s");
    assert_eq!(report["navigations"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_simulate_rejects_negative_advance() {
    let dir = TempDir::new().unwrap();
    let scenario = write_file(&dir, "rewind.json", r#"{"steps": [{"advance": -1000}]}"#);

    cli_cmd()
        .arg("simulate")
        .arg(&scenario)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid scenario"));
}

#[test]
fn test_simulate_unknown_selector_fails() {
    let dir = TempDir::new().unwrap();
    let scenario = write_file(
        &dir,
        "bad.json",
        r#"{"start": "2025-10-22T16:26:56Z", "steps": [{"enter": ".no-such-card"}]}"#,
    );

    cli_cmd()
        .arg("simulate")
        .arg(&scenario)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No element matches"));
}
