//! Integration tests for `idrule redact`.
#![allow(clippy::expect_used)]

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

fn redact(args: &[&str]) -> Output {
    Command::new(idrule_bin())
        .arg("redact")
        .args(args)
        .env_remove("IDRULE_FORMAT")
        .output()
        .expect("run idrule redact")
}

#[test]
fn phone_is_masked_with_fingerprint() {
    let out = redact(&["--kind", "phone", "13800138000"]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "138****8000  7945bd83237335e5376ff44d62e4f0ae\n"
    );
}

#[test]
fn personal_id_is_masked_with_fingerprint() {
    let out = redact(&["--kind", "personal-id", "110101199003077456"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "110***19900307***6  c7886c4677131a20e56cdb87e79d7d8d\n"
    );
}

#[test]
fn wrong_length_exits_1_without_echoing_input() {
    let out = redact(&["--kind", "phone", "1380013800"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stdout.contains("1380013800"), "{stdout}");
    assert!(!stderr.contains("1380013800"), "{stderr}");
    assert!(stderr.contains("could not be redacted"), "{stderr}");
}

#[test]
fn json_rows_carry_masked_and_fingerprint() {
    let out = redact(&["--format", "json", "--kind", "phone", "15912345678"]);
    assert_eq!(out.status.code(), Some(0));
    let row: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&out.stdout).trim()).expect("JSON");
    assert_eq!(row["masked"], "159****5678");
    assert_eq!(row["fingerprint"], "59ae27a8ac7ef3f74120391a3ecb185a");
    assert_eq!(row["kind"], "phone");
}

#[test]
fn missing_kind_is_usage_error() {
    let out = redact(&["13800138000"]);
    assert_eq!(out.status.code(), Some(2));
}
