//! Patch compilation.
//!
//! Turns a write request into an ordered list of [`PathOperation`]s, each
//! addressing one field with a bracket path such as `["data"]["password"]`.
//! The external tool applies them one at a time, so an existing encrypted
//! file is updated in place without a full decrypt and re-encrypt.
//!
//! ## Input shapes
//!
//! - **Maps and sequences** are walked; every leaf becomes one operation and
//!   `null` leaves become removals.
//! - **Strings** are classified in order:
//!   1. `.a.b: value` sets (or with `null` / `$null`, removes) one field
//!   2. multi-line text with `key:` lines is parsed as YAML and walked
//!   3. anything else is stored under the default `value` key
//! - **Other scalars** are stored under the default key.

mod compile;
pub mod document;
mod node;
mod path;

pub use compile::{classify, compile, compile_text, default_path, PatchValue, PathOperation, TextMode};
pub use node::{Node, Scalar};
pub use path::{parse_assignment, parse_field, BracketPath, Segment};
