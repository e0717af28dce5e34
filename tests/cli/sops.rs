//! End-to-end tests against a real sops binary with an age key.

use crate::skip_without_sops;
use crate::support::*;
use std::process::Command as StdCommand;

/// Generate an age key and a matching `.sops.yaml`; returns the key file.
fn setup_age(t: &Test) -> std::path::PathBuf {
    let key = t.root().join("keys.txt");
    let status = StdCommand::new("age-keygen")
        .arg("-o")
        .arg(&key)
        .output()
        .expect("failed to run age-keygen");
    assert!(status.status.success(), "age-keygen failed");

    let contents = std::fs::read_to_string(&key).unwrap();
    let recipient = contents
        .lines()
        .find_map(|l| l.strip_prefix("# public key: "))
        .expect("public key line")
        .to_string();

    t.write(
        ".sops.yaml",
        &format!("creation_rules:\n  - path_regex: .*\\.yaml$\n    age: {recipient}\n"),
    );
    key
}

#[test]
fn test_create_patch_get_remove() {
    skip_without_sops!();
    let t = Test::new();
    let key = setup_age(&t);
    let run = |args: &[&str]| {
        t.cmd()
            .env("SOPS_AGE_KEY_FILE", &key)
            .args(args)
            .output()
            .unwrap()
    };

    let output = run(&["set", "apps/api/db", "user: admin\npassword: old\n"]);
    assert_success(&output);
    assert_stdout_contains(&output, "created apps/api/db");

    let file = t.root().join("apps/api/db.yaml");
    let raw = std::fs::read_to_string(&file).unwrap();
    assert!(!raw.contains("old"), "plaintext left on disk");
    assert_success(&t.cmd().arg("check").arg(&file).output().unwrap());

    let output = run(&["get", "apps/api/db", "--field", "password"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "old");

    let output = run(&["set", "db", ".password: new"]);
    assert_success(&output);
    assert_stdout_contains(&output, "updated apps/api/db (1 field operation(s))");

    let output = run(&["get", "db", "--field", ".user"]);
    assert_eq!(stdout(&output).trim(), "admin");
    let output = run(&["get", "db", "--field", ".password"]);
    assert_eq!(stdout(&output).trim(), "new");

    assert_success(&run(&["set", "db", ".user: null"]));
    let output = run(&["get", "db", "--field", "user"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "field user not found");

    assert_success(&run(&["rm", "db"]));
    assert!(!file.exists());
}

#[test]
fn test_plain_value_roundtrip() {
    skip_without_sops!();
    let t = Test::new();
    let key = setup_age(&t);

    let output = t
        .cmd()
        .env("SOPS_AGE_KEY_FILE", &key)
        .args(["set", "token", "postgres://u:p@host:5432/db"])
        .output()
        .unwrap();
    assert_success(&output);

    let output = t
        .cmd()
        .env("SOPS_AGE_KEY_FILE", &key)
        .args(["get", "token"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "value: postgres://u:p@host:5432/db");
}
