//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, names, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info

use console::{style, StyledObject};
use std::fmt::Display;

/// Check if color output is enabled for stdout.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled()
}

/// Check if color output is enabled for stderr.
fn colors_enabled_stderr() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

fn paint<D>(value: D) -> StyledObject<D> {
    style(value).force_styling(colors_enabled())
}

fn paint_stderr<D>(value: D) -> StyledObject<D> {
    style(value).force_styling(colors_enabled_stderr())
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ created apps/api/db`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓").green(), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ secret not found: db`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint_stderr("✗").red(), msg);
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    println!("{} {}", paint("⚠").yellow(), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: warren list`
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint_stderr("→").cyan(), paint_stderr(msg).cyan());
}

/// Print a bold header.
pub fn header(title: &str) {
    println!("{}", paint(title).bold());
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  path:  apps/api/db.yaml`
pub fn kv(label: &str, value: impl Display) {
    println!("  {}  {}", paint(label).dim(), paint(value).bold());
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a dimmed/secondary message.
///
/// Example: `no secrets found`
pub fn dimmed(msg: &str) {
    println!("{}", paint(msg).dim());
}

/// Format a path in cyan.
pub fn path(p: &std::path::Path) -> String {
    paint(p.display()).cyan().to_string()
}

/// Format a secret name in cyan.
pub fn name(n: &str) -> String {
    paint(n).cyan().to_string()
}

/// Format a secondary value, dimmed.
pub fn faint(s: &str) -> String {
    paint(s).dim().to_string()
}
