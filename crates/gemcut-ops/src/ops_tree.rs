//! Operation: display a build's gem tree.

use std::path::Path;

use gemcut_resolver::diagnostics::Diagnostics;
use gemcut_resolver::graph;
use gemcut_util::errors::GemcutError;

use crate::{load_manifest, print_warnings, resolve_build};

/// Options for `gemcut tree`.
#[derive(Debug, Default)]
pub struct TreeOptions {
    /// Build whose pass set is shown.
    pub build: Option<String>,
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
    /// Show what depends on this gem instead.
    pub inverted: Option<String>,
}

/// Display the dependency tree of a build, or the inverted tree of one gem.
pub fn tree(manifest_path: &Path, opts: &TreeOptions) -> miette::Result<()> {
    let manifest = load_manifest(manifest_path)?;

    // Handle --inverted
    if let Some(ref target) = opts.inverted {
        let table = manifest.gem_table()?;
        match graph::render_inverted_tree(&table, target) {
            Some(output) => print!("{output}"),
            None => println!("Gem '{target}' not found in Gemcut.toml."),
        }
        return Ok(());
    }

    let Some(build) = opts.build.as_deref() else {
        return Err(GemcutError::Generic {
            message: "Pass --build <NAME> or --inverted <GEM>".to_string(),
        }
        .into());
    };

    let mut diagnostics = Diagnostics::new();
    let (table, resolution) = resolve_build(&manifest, build, &mut diagnostics)?;
    print_warnings(&diagnostics);

    if resolution.pass.is_empty() {
        println!("No gems bundled.");
        return Ok(());
    }

    let output = graph::render_tree(&table, &resolution.pass, opts.depth);
    print!("{output}");

    Ok(())
}
