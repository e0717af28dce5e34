//! Core library components.
//!
//! The index, resolver, classifier and patch compiler are pure and operate on
//! plain paths and strings. Only [`sops`] runs external processes, and only
//! [`vault`] ties the pieces together.

pub mod config;
pub mod constants;
pub mod detect;
pub mod domain;
pub mod index;
pub mod patch;
pub mod resolve;
pub mod settings;
pub mod sops;
pub mod types;
pub mod validation;
pub mod vault;
