//! End-to-end tests for the reaper binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_demo_reports_all_tasks() {
    Command::cargo_bin("reaper")
        .unwrap()
        .args(["demo", "--workers", "3", "--tasks-per-worker", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expected:  7"))
        .stdout(predicate::str::contains("completed: 7"))
        .stdout(predicate::str::contains("live:      0"));
}

#[test]
fn test_demo_with_failures() {
    Command::cargo_bin("reaper")
        .unwrap()
        .args([
            "demo",
            "--workers",
            "2",
            "--tasks-per-worker",
            "3",
            "--fail-every",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed: 4"))
        .stdout(predicate::str::contains("failed:    3"));
}

#[test]
fn test_config_from_env() {
    Command::cargo_bin("reaper")
        .unwrap()
        .arg("config")
        .env("REAPER_THREAD_NAME", "custom-reaper")
        .env("REAPER_POLL_INTERVAL_MS", "200")
        .assert()
        .success()
        .stdout(predicate::str::contains("reaper_name:    custom-reaper"))
        .stdout(predicate::str::contains("poll_interval:  200ms"));
}

#[test]
fn test_config_rejects_bad_env() {
    Command::cargo_bin("reaper")
        .unwrap()
        .arg("config")
        .env("REAPER_POLL_INTERVAL_MS", "never")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REAPER_POLL_INTERVAL_MS"));
}
