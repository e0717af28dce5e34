//! Tests for error handling, global flags and logging.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Usage");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "warren");
}

#[test]
fn test_root_not_a_directory() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["list", "--root", "does/not/exist"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "not a directory");
}

#[test]
fn test_malformed_settings_fail_fast() {
    let t = Test::with_secrets(&["db"]);
    t.settings("[store\npattern = ");

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse settings file");
}

#[test]
fn test_invalid_settings_value() {
    let t = Test::with_secrets(&["db"]);
    t.settings("[store]\npattern = \"\"\n");

    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "store.pattern");
}

#[test]
fn test_get_missing_secret() {
    let t = Test::with_secrets(&["db"]);

    let output = t.get("cache");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret not found: cache");
}

#[test]
fn test_rm_deletes_file() {
    let t = Test::with_secrets(&["apps/db", "apps/cache"]);

    let output = t.rm("db");
    assert_success(&output);
    assert_stdout_contains(&output, "removed apps/db");
    assert!(!t.root().join("apps/db.yaml").exists());
    assert_eq!(listed_names(&t.list_json()), vec!["apps/cache"]);
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::with_secrets(&["db"]);

    let output = t.cmd().args(["--verbose", "list", "--json"]).output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "index built");
    // stdout stays machine-readable
    assert_eq!(listed_names(&output), vec!["db"]);
}

#[test]
fn test_log_env_filter() {
    let t = Test::with_secrets(&["db"]);

    let output = t
        .cmd()
        .env("WARREN_LOG", "warren=debug")
        .args(["list"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "building index");
}

#[test]
fn test_completions_bash_outputs_script() {
    Test::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_warren"));
}

#[test]
fn test_completions_zsh() {
    Test::new()
        .cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#compdef warren"));
}

#[test]
fn test_errors_go_to_stderr_only() {
    let t = Test::with_secrets(&["db"]);

    t.cmd()
        .args(["get", "nope"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("secret not found: nope").and(predicate::str::contains("run: warren list")));
}
