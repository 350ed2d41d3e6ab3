//! Handler for `gemcut header`.

use std::path::{Path, PathBuf};

use miette::Result;

use gemcut_ops::ops_header::{self, HeaderOptions};

pub fn exec(manifest: &Path, build: String, output: Option<PathBuf>) -> Result<()> {
    let opts = HeaderOptions { build, output };
    ops_header::header(manifest, &opts)
}
