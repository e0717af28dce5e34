//! Tests for `warren list`.

use crate::support::*;

#[test]
fn test_list_empty_store() {
    let t = Test::new();

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "no secrets found");
}

#[test]
fn test_list_names_from_paths() {
    let t = Test::with_secrets(&["apps/api/db", "apps/web/db", "tls"]);
    t.write("apps/notes.txt", "not yaml");

    let output = t.list_json();
    assert_success(&output);
    assert_eq!(listed_names(&output), vec!["apps/api/db", "apps/web/db", "tls"]);
}

#[test]
fn test_list_json_fields() {
    let t = Test::with_secrets(&["apps/api/db"]);

    let output = t.list_json();
    assert_success(&output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["secrets"][0]["namespace"], "apps/api");
    assert_eq!(json["secrets"][0]["short_name"], "db");
}

#[test]
fn test_list_excludes_config_files() {
    let t = Test::with_secrets(&["db"]);
    t.write(".sops.yaml", SOPS_CONFIG_WITH_SUFFIX);

    let output = t.list_json();
    assert_success(&output);
    assert_eq!(listed_names(&output), vec!["db"]);
}

#[test]
fn test_list_skips_hidden_directories() {
    let t = Test::with_secrets(&["db"]);
    t.write(".git/config.yaml", ENCRYPTED_DOC);

    assert_eq!(listed_names(&t.list_json()), vec!["db"]);
}

#[test]
fn test_list_require_encryption_hides_plaintext() {
    let t = Test::with_secrets(&["db"]);
    t.plaintext("draft");

    assert_eq!(listed_names(&t.list_json()), vec!["db", "draft"]);

    t.settings(REQUIRE_ENCRYPTION);
    assert_eq!(listed_names(&t.list_json()), vec!["db"]);
}

#[test]
fn test_list_unencrypted_suffix_prefilter() {
    let t = Test::with_secrets(&["db", "config_public"]);
    t.write(".sops.yaml", SOPS_CONFIG_WITH_SUFFIX);
    t.settings(REQUIRE_ENCRYPTION);

    assert_eq!(listed_names(&t.list_json()), vec!["db"]);
}

#[test]
fn test_list_malformed_sops_config_degrades() {
    let t = Test::with_secrets(&["db"]);
    t.write(".sops.yaml", "creation_rules: [unclosed\n");
    t.settings(REQUIRE_ENCRYPTION);

    let output = t.list_json();
    assert_success(&output);
    assert_eq!(listed_names(&output), vec!["db"]);
}

#[test]
fn test_list_namespace_filter() {
    let t = Test::with_secrets(&["apps/api/db", "apps/web/db", "infra/tls"]);

    let output = t
        .cmd()
        .args(["list", "--namespace", "apps", "--json"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(listed_names(&output), vec!["apps/api/db", "apps/web/db"]);
}

#[test]
fn test_list_no_recurse() {
    let t = Test::with_secrets(&["top", "nested/deep"]);
    t.settings("[store]\nrecurse = false\n");

    assert_eq!(listed_names(&t.list_json()), vec!["top"]);
}

#[test]
fn test_list_custom_pattern() {
    let t = Test::new();
    t.write("db.json", "{}");
    t.write("db2.yaml", PLAIN_DOC);
    t.settings("[store]\npattern = \"*.json\"\n");

    assert_eq!(listed_names(&t.list_json()), vec!["db"]);
}

#[test]
fn test_list_root_flag_and_env() {
    let t = Test::with_secrets(&["db"]);
    let elsewhere = tempfile::TempDir::new().unwrap();

    let output = t
        .cmd()
        .current_dir(elsewhere.path())
        .args(["list", "--json", "--root"])
        .arg(t.root())
        .output()
        .unwrap();
    assert_eq!(listed_names(&output), vec!["db"]);

    let output = t
        .cmd()
        .current_dir(elsewhere.path())
        .env("WARREN_ROOT", t.root())
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert_eq!(listed_names(&output), vec!["db"]);
}
