//! warren - Browse and edit a tree of sops-encrypted secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── secrets       # list, get, set, rm
//! │   ├── resolve       # Show where a name points
//! │   ├── check         # Classify files
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .sops.yaml reader
//!     ├── settings      # .warren.toml store settings
//!     ├── detect        # Encrypted-file classifier
//!     ├── index         # Directory walk into logical names
//!     ├── resolve       # Full and short name resolution
//!     ├── patch/        # Input compiled to field operations
//!     ├── sops          # Tool trait and the sops backend
//!     └── vault/        # Store facade
//! ```
//!
//! # Features
//!
//! - Secrets addressed by path-derived names, with unique short names
//! - Field-level updates that never rewrite the whole encrypted file
//! - Structured YAML, path assignments or plain values as input
//! - New files encrypted at their final path so creation rules apply

pub mod cli;
pub mod core;
pub mod error;
