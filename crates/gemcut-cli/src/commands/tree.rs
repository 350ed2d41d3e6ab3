//! Handler for `gemcut tree`.

use std::path::Path;

use miette::Result;

use gemcut_ops::ops_tree::{self, TreeOptions};

pub fn exec(
    manifest: &Path,
    build: Option<String>,
    depth: Option<u32>,
    inverted: Option<String>,
) -> Result<()> {
    let opts = TreeOptions {
        build,
        depth: depth.map(|d| d as usize),
        inverted,
    };

    ops_tree::tree(manifest, &opts)
}
