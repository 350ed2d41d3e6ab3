pub mod ops_header;
pub mod ops_resolve;
pub mod ops_tree;

use std::path::Path;

use gemcut_core::gem::GemTable;
use gemcut_core::manifest::Manifest;
use gemcut_resolver::diagnostics::Diagnostics;
use gemcut_resolver::resolver::{build_context, resolve_model, ModelResolution};
use gemcut_util::errors::GemcutError;
use gemcut_util::status::status_warn;

/// Load a manifest, reporting a missing file the same way for every command.
pub fn load_manifest(manifest_path: &Path) -> miette::Result<Manifest> {
    if !manifest_path.is_file() {
        return Err(GemcutError::Manifest {
            message: format!("Could not find {}", manifest_path.display()),
        }
        .into());
    }
    Manifest::from_path(manifest_path)
}

/// Resolve a single named build of `manifest`.
pub fn resolve_build(
    manifest: &Manifest,
    build: &str,
    diagnostics: &mut Diagnostics,
) -> miette::Result<(GemTable, ModelResolution)> {
    let Some(policies) = manifest.build(build) else {
        return Err(GemcutError::Manifest {
            message: format!("No build named '{build}' in Gemcut.toml"),
        }
        .into());
    };
    let table = manifest.gem_table()?;
    let resolution = resolve_model(&table, &policies, &build_context(build), diagnostics)?;
    Ok((table, resolution))
}

/// Echo collected warnings to stderr.
pub fn print_warnings(diagnostics: &Diagnostics) {
    for w in diagnostics.warnings() {
        status_warn("warning", &w.to_string());
    }
}
