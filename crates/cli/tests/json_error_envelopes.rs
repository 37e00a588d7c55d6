//! Ensure CLI command failures honor `--output json`.

mod common;

use common::run_json;

#[test]
fn check_missing_file_emits_json_error_envelope() {
    let (output, json) = run_json(&["check", "--file", "nope-does-not-exist.txt"]);

    assert!(!output.status.success());
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "command_failed");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("failed to read filter file")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn check_without_filters_emits_json_error_envelope() {
    let (output, json) = run_json(&["check"]);

    assert!(!output.status.success());
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "command_failed");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("no filters given")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn rejected_filter_is_not_an_envelope() {
    let (output, json) = run_json(&["check", "(cn=foo"]);

    assert!(!output.status.success());
    assert!(json.get("success").is_none());
    assert_eq!(json["ok"], false);
}
