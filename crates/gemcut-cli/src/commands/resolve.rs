//! Handler for `gemcut resolve`.

use std::path::Path;

use miette::Result;

use gemcut_ops::ops_resolve::{self, ResolveOptions};

pub fn exec(manifest: &Path, build: Option<String>, json: bool) -> Result<()> {
    let opts = ResolveOptions { build, json };
    ops_resolve::resolve(manifest, &opts)
}
