//! Tests for `warren check`.

use crate::support::*;

#[test]
fn test_check_encrypted_file() {
    let t = Test::new();
    let path = t.encrypted("db");

    let output = t.cmd().arg("check").arg(&path).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted");
    assert_stdout_excludes(&output, "not encrypted");
}

#[test]
fn test_check_plaintext_fails() {
    let t = Test::new();
    let good = t.encrypted("db");
    let bad = t.plaintext("draft");

    let output = t.cmd().arg("check").arg(&good).arg(&bad).output().unwrap();
    assert_failure(&output);
    assert_stdout_contains(&output, "not encrypted");
    assert_stderr_contains(&output, "1 of 2 file(s) are not encrypted");
}

#[test]
fn test_check_metadata_without_version() {
    let t = Test::new();
    let mut doc = String::from("a: 1\nsops:\n");
    for i in 0..60 {
        doc.push_str(&format!("    key{i}: value\n"));
    }
    doc.push_str("    version: 3.9.0\n");
    let path = t.write("late.yaml", &doc);

    let output = t.cmd().arg("check").arg(&path).output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_check_crlf_file() {
    let t = Test::new();
    let path = t.write("win.yaml", "a: 1\r\nsops:\r\n    version: 3.9.0\r\n");

    let output = t.cmd().arg("check").arg(&path).output().unwrap();
    assert_success(&output);
}

#[test]
fn test_check_missing_file() {
    let t = Test::new();

    let output = t.cmd().args(["check", "missing.yaml"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "missing.yaml");
}

#[test]
fn test_check_requires_files() {
    let t = Test::new();

    let output = t.cmd().arg("check").output().unwrap();
    assert_failure(&output);
}
