//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a warren command rooted at the test store.
    ///
    /// Environment that would change behavior is cleared and color is
    /// disabled so output can be matched literally.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("warren").expect("failed to find warren binary");
        cmd.env_remove("WARREN_ROOT");
        cmd.env_remove("WARREN_SOPS");
        cmd.env_remove("WARREN_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `warren list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run warren list")
    }

    /// Shortcut for `warren list --json`.
    pub fn list_json(&self) -> Output {
        self.cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run warren list --json")
    }

    /// Shortcut for `warren resolve`.
    pub fn resolve(&self, name: &str) -> Output {
        self.cmd()
            .args(["resolve", name])
            .output()
            .expect("failed to run warren resolve")
    }

    /// Shortcut for `warren set --dry-run`.
    pub fn dry_run(&self, name: &str, value: &str) -> Output {
        self.cmd()
            .args(["set", name, value, "--dry-run"])
            .output()
            .expect("failed to run warren set --dry-run")
    }

    /// Shortcut for `warren set`.
    pub fn set(&self, name: &str, value: &str) -> Output {
        self.cmd()
            .args(["set", name, value])
            .output()
            .expect("failed to run warren set")
    }

    /// Shortcut for `warren get`.
    pub fn get(&self, name: &str) -> Output {
        self.cmd()
            .args(["get", name])
            .output()
            .expect("failed to run warren get")
    }

    /// Shortcut for `warren get --field`.
    pub fn get_field(&self, name: &str, field: &str) -> Output {
        self.cmd()
            .args(["get", name, "--field", field])
            .output()
            .expect("failed to run warren get --field")
    }

    /// Shortcut for `warren rm`.
    pub fn rm(&self, name: &str) -> Output {
        self.cmd()
            .args(["rm", name])
            .output()
            .expect("failed to run warren rm")
    }
}
