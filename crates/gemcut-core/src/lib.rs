//! Core data types for gemcut.
//!
//! This crate defines the input side of gem resolution: the gem table built
//! once per build model, the policy values a build declares for bundling and
//! dropping gems, and the `Gemcut.toml` manifest they are read from.
//!
//! This crate is intentionally free of resolution logic.

/// Default manifest file name looked up in the working directory.
pub const MANIFEST_FILE: &str = "Gemcut.toml";

/// The gem that provides runtime selection. It counts as loaded from the start.
pub const SELF_GEM: &str = "mruby-gemcut";

pub mod gem;
pub mod manifest;
pub mod policy;
