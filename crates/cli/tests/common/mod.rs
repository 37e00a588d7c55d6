//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::process::{Command, Output};

use assert_cmd::cargo;

pub fn ldap_cmd() -> Command {
    Command::new(cargo::cargo_bin!("ldap-syntax"))
}

/// Run with `--output json` appended and parse stdout.
pub fn run_json(args: &[&str]) -> (Output, serde_json::Value) {
    let output = ldap_cmd()
        .args(args)
        .args(["--output", "json"])
        .output()
        .expect("run command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"));
    (output, json)
}

pub fn write_temp_filters(content: &str) -> (tempfile::TempDir, String) {
    write_temp_filter_bytes(content.as_bytes())
}

pub fn write_temp_filter_bytes(content: &[u8]) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("filters.txt");
    fs::write(&path, content).expect("write temp filters");
    (dir, path.to_string_lossy().to_string())
}
