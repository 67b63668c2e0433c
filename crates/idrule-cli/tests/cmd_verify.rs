//! Integration tests for `idrule verify`.
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

fn verify(args: &[&str]) -> Output {
    Command::new(idrule_bin())
        .arg("verify")
        .args(args)
        .env_remove("IDRULE_FORMAT")
        .output()
        .expect("run idrule verify")
}

#[test]
fn matching_value_exits_0() {
    let out = verify(&[
        "--fingerprint",
        "7945bd83237335e5376ff44d62e4f0ae",
        "13800138000",
    ]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "match\n");
}

#[test]
fn uppercase_hex_is_accepted() {
    let out = verify(&[
        "--fingerprint",
        "7945BD83237335E5376FF44D62E4F0AE",
        "13800138000",
    ]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn other_value_exits_1() {
    let out = verify(&[
        "--fingerprint",
        "7945bd83237335e5376ff44d62e4f0ae",
        "13800138001",
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "mismatch\n");
}

#[test]
fn malformed_fingerprint_exits_2() {
    let out = verify(&["--fingerprint", "not-hex", "13800138000"]);
    assert_eq!(out.status.code(), Some(2));
}
