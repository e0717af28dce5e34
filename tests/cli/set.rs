//! Tests for `warren set` that do not need a working sops.

use crate::support::*;

#[test]
fn test_dry_run_new_secret_plain_value() {
    let t = Test::new();

    let output = t.dry_run("apps/api/token", "postgres://u:p@host:5432/db");
    assert_success(&output);
    assert_stdout_contains(&output, "would create:");
    assert_stdout_contains(&output, "plain value");
    assert_stdout_contains(&output, r#"set ["value"] "postgres://u:p@host:5432/db""#);
    assert!(!t.root().join("apps").exists());
}

#[test]
fn test_dry_run_existing_secret_path_syntax() {
    let t = Test::with_secrets(&["apps/api/db"]);

    let output = t.dry_run("db", ".stringData.password: s3cret");
    assert_success(&output);
    assert_stdout_contains(&output, "would patch:");
    assert_stdout_contains(&output, "apps/api/db");
    assert_stdout_contains(&output, "path-syntax");
    assert_stdout_contains(&output, r#"set ["stringData"]["password"] "s3cret""#);
}

#[test]
fn test_dry_run_path_syntax_null_removes() {
    let t = Test::with_secrets(&["db"]);

    let output = t.dry_run("db", ".old: null");
    assert_success(&output);
    assert_stdout_contains(&output, r#"unset ["old"]"#);
}

#[test]
fn test_dry_run_malformed_path_syntax_fails() {
    let t = Test::with_secrets(&["db"]);

    let output = t.dry_run("db", ".db[pass]: x");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid path-syntax input '.db[pass]: x'");
    assert_stdout_excludes(&output, r#"["value"]"#);
}

#[test]
fn test_dry_run_null_sequence_item_fails() {
    let t = Test::with_secrets(&["db"]);

    let output = t.dry_run("db", "hosts:\n  - a\n  - null\n");
    assert_failure(&output);
    assert_stderr_contains(&output, r#"["hosts"][1]"#);
}

#[test]
fn test_dry_run_structured_in_order() {
    let t = Test::with_secrets(&["db"]);

    let output = t.dry_run("db", "user: admin\nport: 5432\nhosts:\n  - a\n  - b\n");
    assert_success(&output);
    assert_stdout_contains(&output, "structured text");

    let out = stdout(&output);
    let ops: Vec<&str> = out
        .lines()
        .filter_map(|l| l.trim_start().strip_prefix("• "))
        .collect();
    assert_eq!(
        ops,
        vec![
            r#"set ["user"] "admin""#,
            r#"set ["port"] 5432"#,
            r#"set ["hosts"][0] "a""#,
            r#"set ["hosts"][1] "b""#,
        ]
    );
}

#[test]
fn test_dry_run_reads_stdin() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["set", "token", "-", "--dry-run"])
        .write_stdin("hunter2\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, r#"set ["value"] "hunter2""#);
}

#[test]
fn test_dry_run_from_json_file() {
    let t = Test::new();
    let input = t.root().join("input.json");
    std::fs::write(&input, r#"{"b": 1, "a": {"enabled": true}}"#).unwrap();

    let output = t
        .cmd()
        .args(["set", "cfg", "--dry-run", "--file"])
        .arg(&input)
        .output()
        .unwrap();
    assert_success(&output);
    let out = stdout(&output);
    let b = out.find(r#"set ["b"] 1"#).expect("b op");
    let a = out.find(r#"set ["a"]["enabled"] true"#).expect("a op");
    assert!(b < a);
}

#[test]
fn test_set_collision_writes_nothing() {
    let t = Test::with_secrets(&["apps/api/db", "apps/web/db"]);

    let output = t.set("db", "x");
    assert_failure(&output);
    assert_stderr_contains(&output, "ambiguous");
    assert_eq!(
        std::fs::read_to_string(t.root().join("apps/api/db.yaml")).unwrap(),
        ENCRYPTED_DOC
    );
}

#[test]
fn test_set_malformed_structured_input() {
    let t = Test::with_secrets(&["db"]);

    let output = t.set("db", "a: [1\nb: 2\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "structured text could not be parsed");
}

#[test]
fn test_set_invalid_name() {
    let t = Test::new();

    let output = t.set("apps/../escape", "x");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret name");
}

#[test]
fn test_set_refuses_unindexed_file() {
    let t = Test::new();
    t.settings(REQUIRE_ENCRYPTION);
    t.plaintext("draft");

    let output = t.set("draft", "x");
    assert_failure(&output);
    assert_stderr_contains(&output, "not part of the store");
    assert_eq!(
        std::fs::read_to_string(t.root().join("draft.yaml")).unwrap(),
        PLAIN_DOC
    );
}

#[test]
fn test_set_missing_tool_leaves_no_plaintext() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--sops", "warren-test-no-such-sops", "set", "apps/token", "hunter2"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "warren-test-no-such-sops not found");
    assert_stderr_contains(&output, "--sops");
    assert!(!t.root().join("apps/token.yaml").exists());
}

#[cfg(unix)]
#[test]
fn test_set_failed_encryption_leaves_no_plaintext() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("WARREN_SOPS", "false")
        .args(["set", "apps/api/token", "hunter2"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "encrypt failed");
    assert!(!t.root().join("apps/api/token.yaml").exists());
    assert!(!t.root().join("apps").exists());
}
