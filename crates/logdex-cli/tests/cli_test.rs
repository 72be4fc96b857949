//! Binary-level tests driving `logdex` against real log directories.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn logdex() -> Command {
    let mut cmd = Command::cargo_bin("logdex").expect("binary");
    cmd.env_remove("LOGDEX_DIRS").env_remove("LOGDEX_CONFIG");
    cmd
}

#[test]
fn missing_directories_fails_with_hint() {
    logdex()
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dir"));
}

#[test]
fn files_lists_matching_logs() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("debug1.log"), "hello\n").expect("write");
    fs::write(dir.path().join("app.log"), "hello\n").expect("write");

    logdex()
        .arg("--dir")
        .arg(dir.path())
        .arg("files")
        .assert()
        .success()
        .stdout(predicate::str::contains("debug1.log"))
        .stdout(predicate::str::contains("app.log").not());
}

#[test]
fn search_outputs_json_page() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("error.log"),
        "{\"level\":\"error\",\"message\":\"Database down\",\"timestamp\":\"2025-01-20T10:05:00.000Z\"}\n",
    )
    .expect("write");

    logdex()
        .arg("--dir")
        .arg(dir.path())
        .args(["--format", "json", "search", "database"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_count\": 1"))
        .stdout(predicate::str::contains("\"is_structured\": true"));
}

#[test]
fn search_rejects_bad_date() {
    let dir = tempfile::tempdir().expect("tempdir");

    logdex()
        .arg("--dir")
        .arg(dir.path())
        .args(["search", "--since", "last tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn show_prints_entry() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("debug.log"), "warming cache\n").expect("write");

    logdex()
        .arg("--dir")
        .arg(dir.path())
        .args(["show", "debug.log:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warming cache"));
}
