//! Constants used throughout warren.
//!
//! Centralizes magic strings and tuning values.

/// SOPS configuration file name. Always excluded from the index.
pub const SOPS_CONFIG_FILE: &str = ".sops.yaml";

/// Store settings file name (.warren.toml).
pub const SETTINGS_FILE: &str = ".warren.toml";

/// Default glob applied to file names when building the index.
pub const DEFAULT_PATTERN: &str = "*.yaml";

/// Default external tool binary.
pub const DEFAULT_SOPS_BINARY: &str = "sops";

/// Extension given to newly created secrets.
pub const SECRET_EXTENSION: &str = "yaml";

/// Extensions stripped from file names to form secret names.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Key used when a plain value is stored without any structure.
pub const DEFAULT_VALUE_KEY: &str = "value";

/// Top-level key that carries sops metadata.
pub const SOPS_MARKER: &str = "sops:";

/// Lines scanned after the marker before giving up on finding a version.
pub const METADATA_LOOKAHEAD: usize = 50;

/// Spaces substituted for each tab when retrying a failed structured parse.
pub const TAB_WIDTH: usize = 2;
