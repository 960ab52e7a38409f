//! End-to-end integration tests for the complete time tracking flow.
//!
//! Drives the compiled binary: start → stop → resume → cancel → edit →
//! delete → report, against a database in a temporary directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn punch_binary() -> String {
    env!("CARGO_BIN_EXE_punch").to_string()
}

/// Runs `punch` with config and data isolated inside `home`.
fn punch(home: &Path, args: &[&str]) -> Output {
    Command::new(punch_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env("PUNCH_DATABASE_PATH", home.join("punch.db"))
        .env_remove("PUNCH_DEFAULT_FILTER")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run punch")
}

/// Runs `punch` and asserts it succeeded, returning stdout.
fn punch_ok(home: &Path, args: &[&str]) -> String {
    let output = punch(home, args);
    assert!(
        output.status.success(),
        "punch {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_start_stop_report_flow() {
    let temp = TempDir::new().unwrap();

    let started = punch_ok(temp.path(), &["start", "work", "--notes", "deep work"]);
    assert!(started.starts_with("Started 'work' at "));

    let status = punch_ok(temp.path(), &["status"]);
    assert!(status.contains("Tracking 'work' since "));
    assert!(status.contains("Notes: deep work"));

    let stopped = punch_ok(temp.path(), &["stop"]);
    assert!(stopped.starts_with("Stopped 'work' after "));

    let status = punch_ok(temp.path(), &["status"]);
    assert!(status.contains("No active interval."));

    let report = punch_ok(temp.path(), &["report"]);
    assert!(report.contains("deep work"));
    assert!(report.contains("SUMMARY"));
    assert!(report.contains("Total: "));
    assert!(report.contains("AVG: "));
}

#[test]
fn test_report_today_includes_current_date() {
    let temp = TempDir::new().unwrap();
    punch_ok(temp.path(), &["start", "work"]);
    punch_ok(temp.path(), &["stop"]);

    let report = punch_ok(temp.path(), &["report", "today"]);
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    assert!(report.contains(&today), "report should show today's date: {report}");
}

#[test]
fn test_start_while_tracking_fails() {
    let temp = TempDir::new().unwrap();
    punch_ok(temp.path(), &["start", "work"]);

    let output = punch(temp.path(), &["start", "meeting"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already tracking 'work'"), "stderr: {stderr}");
}

#[test]
fn test_stop_without_active_interval_fails() {
    let temp = TempDir::new().unwrap();

    let output = punch(temp.path(), &["stop"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no active interval"));
}

#[test]
fn test_resume_restarts_last_tag() {
    let temp = TempDir::new().unwrap();
    punch_ok(temp.path(), &["start", "writing", "--notes", "chapter 3"]);
    punch_ok(temp.path(), &["stop"]);

    let resumed = punch_ok(temp.path(), &["resume"]);
    assert!(resumed.starts_with("Resumed 'writing' at "));
    punch_ok(temp.path(), &["stop"]);

    let csv_path = temp.path().join("all.csv");
    punch_ok(
        temp.path(),
        &["report", "all", "--csv", csv_path.to_str().unwrap()],
    );
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ID,Start,End,Tag,Notes");
    assert!(lines[1].ends_with(",writing,chapter 3"));
    assert!(lines[2].ends_with(",writing,chapter 3"));
}

#[test]
fn test_cancel_hides_interval_from_reports() {
    let temp = TempDir::new().unwrap();
    punch_ok(temp.path(), &["start", "work"]);

    let cancelled = punch_ok(temp.path(), &["cancel"]);
    assert_eq!(cancelled, "Cancelled 'work' (interval 1)\n");

    let report = punch_ok(temp.path(), &["report", "all"]);
    assert_eq!(report, "No tracked time found for the specified filter\n");
}

#[test]
fn test_edit_and_delete() {
    let temp = TempDir::new().unwrap();
    punch_ok(temp.path(), &["start", "wrok"]);
    punch_ok(temp.path(), &["stop"]);

    let edited = punch_ok(temp.path(), &["edit", "1", "--tag", "work", "--notes", "fixed"]);
    assert_eq!(edited, "Updated interval 1: 'work' (fixed)\n");

    let report = punch_ok(temp.path(), &["report", "all", "--tag", "work"]);
    assert!(report.contains("fixed"));

    let report = punch_ok(temp.path(), &["report", "all", "--tag", "wrok"]);
    assert_eq!(report, "No tracked time found for the specified filter\n");

    punch_ok(temp.path(), &["delete", "1"]);
    let report = punch_ok(temp.path(), &["report", "all"]);
    assert_eq!(report, "No tracked time found for the specified filter\n");

    let output = punch(temp.path(), &["delete", "1"]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_filter_exports_header_only() {
    let temp = TempDir::new().unwrap();
    punch_ok(temp.path(), &["start", "work"]);
    punch_ok(temp.path(), &["stop"]);

    let csv_path = temp.path().join("none.csv");
    let report = punch_ok(
        temp.path(),
        &["report", "invalid_filter", "--csv", csv_path.to_str().unwrap()],
    );
    assert!(report.starts_with("No tracked time found for the specified filter\n"));
    assert_eq!(
        std::fs::read_to_string(&csv_path).unwrap(),
        "ID,Start,End,Tag,Notes\n"
    );
}

#[test]
fn test_active_interval_shown_but_not_counted() {
    let temp = TempDir::new().unwrap();
    punch_ok(temp.path(), &["start", "work"]);

    let report = punch_ok(temp.path(), &["report", "today"]);
    assert!(report.contains("active"));
    assert!(report.contains("Total: 00:00:00  AVG: 0.0min"));
}

#[test]
fn test_report_json() {
    let temp = TempDir::new().unwrap();
    punch_ok(temp.path(), &["start", "work"]);
    punch_ok(temp.path(), &["stop"]);

    let output = punch_ok(temp.path(), &["report", "week", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["filter"], "week");
    assert_eq!(json["intervals"].as_array().unwrap().len(), 1);
    assert_eq!(json["statistics"]["tags"][0]["tag"], "work");
}

#[test]
fn test_config_file_sets_default_filter() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("punch.toml");
    std::fs::write(&config_path, "default_filter = \"invalid_filter\"\n").unwrap();

    punch_ok(temp.path(), &["start", "work"]);
    punch_ok(temp.path(), &["stop"]);

    let report = punch_ok(
        temp.path(),
        &["--config", config_path.to_str().unwrap(), "report"],
    );
    assert_eq!(report, "No tracked time found for the specified filter\n");
}
