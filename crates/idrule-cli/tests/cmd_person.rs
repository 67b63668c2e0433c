//! Integration tests for `idrule person`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the compiled `idrule` binary.
fn idrule_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("idrule");
    path
}

fn person(args: &[&str]) -> Output {
    Command::new(idrule_bin())
        .args(["person", "--today", "2026-02-19"])
        .args(args)
        .env_remove("IDRULE_FORMAT")
        .output()
        .expect("run idrule person")
}

#[test]
fn valid_id_exits_0_and_prints_fields() {
    let out = person(&["11010519491231002X"]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("district=110105"), "{stdout}");
    assert!(stdout.contains("birth_date=1949-12-31"), "{stdout}");
    assert!(stdout.contains("sex=female"), "{stdout}");
}

#[test]
fn checksum_failure_exits_1() {
    let out = person(&["110101199003077456"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[INVALID]"), "{stdout}");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("1 of 1 values are invalid"), "{stderr}");
}

#[test]
fn mixed_batch_reports_every_value() {
    let out = person(&["440300198001011233", "110101190002290011", "12345"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 3, "{stdout}");
    assert!(stdout.contains("invalid_birth_date"), "{stdout}");
    assert!(stdout.contains("wrong_length"), "{stdout}");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("3 checked, 2 failed"), "{stderr}");
}

#[test]
fn future_birth_date_is_rejected() {
    let out = person(&["110101202602200011"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("future_birth_date"));
}

#[test]
fn json_output_is_ndjson() {
    let out = person(&["--format", "json", "110101200002290018", "110101199003077456"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let rows: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["valid"], true);
    assert_eq!(rows[0]["birth_date"], "2000-02-29");
    assert_eq!(rows[1]["valid"], false);
    assert_eq!(rows[1]["district_id"], 110_101);
    assert_eq!(rows[1]["reason"], "checksum_mismatch");
}

#[test]
fn reads_values_from_file() {
    let mut f = tempfile::NamedTempFile::new().expect("temp file");
    f.write_all(b"11010519491231002X\n\n  440300198001011233  \n")
        .expect("write");
    let out = person(&["--file", f.path().to_str().expect("path")]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 2);
}

#[test]
fn missing_file_exits_2() {
    let out = person(&["--file", "/nonexistent/idrule/ids.txt"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not found"));
}

#[test]
fn no_values_exits_2() {
    let out = person(&[]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn quiet_suppresses_summary() {
    let out = person(&["--quiet", "11010519491231002X"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stderr.is_empty(), "{}", String::from_utf8_lossy(&out.stderr));
}
