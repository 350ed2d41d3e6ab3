//! Shared utilities for gemcut.
//!
//! This crate provides the cross-cutting concerns used by every other gemcut
//! crate: the unified error type and Cargo-style terminal status lines.

pub mod errors;
pub mod status;
