//! Integration tests for `idrule org`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

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

fn org(args: &[&str]) -> Output {
    Command::new(idrule_bin())
        .arg("org")
        .args(args)
        .env_remove("IDRULE_FORMAT")
        .output()
        .expect("run idrule org")
}

#[test]
fn valid_codes_exit_0() {
    let out = org(&[
        "91110000600037341L",
        "91310000MA1FL1MMXL",
        "9144030071526726xg",
    ]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&out.stdout).matches("[OK]").count(), 3);
}

#[test]
fn pilot_code_reports_expected_check_char() {
    let out = org(&["--format", "json", "91350211M0000XUF46"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let row: serde_json::Value = serde_json::from_str(stdout.trim()).expect("JSON");
    assert_eq!(row["valid"], false);
    assert_eq!(row["reason"], "checksum_mismatch");
    assert_eq!(row["expected_check_char"], "R");
}

#[test]
fn unassigned_letter_is_reported() {
    let out = org(&["9111000060003734IL"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("unassigned_character"));
}

#[test]
fn reads_codes_from_stdin() {
    let mut child = Command::new(idrule_bin())
        .args(["org", "--file", "-"])
        .env_remove("IDRULE_FORMAT")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn idrule org");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"91110108551385082Q\n91440300708461136T\n")
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 2);
}

#[test]
fn oversized_file_exits_2() {
    let mut f = tempfile::NamedTempFile::new().expect("temp file");
    f.write_all(b"91110000600037341L\n91310000MA1FL1MMXL\n")
        .expect("write");
    let out = org(&[
        "--max-file-size",
        "10",
        "--file",
        f.path().to_str().expect("path"),
    ]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("too large"));
}
