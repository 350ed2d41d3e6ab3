//! Command dispatch and handler modules.

mod header;
mod resolve;
mod tree;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    tracing::debug!(manifest = %cli.manifest.display(), "dispatching command");
    match cli.command {
        Command::Resolve { build, json } => resolve::exec(&cli.manifest, build, json),
        Command::Tree {
            build,
            depth,
            inverted,
        } => tree::exec(&cli.manifest, build, depth, inverted),
        Command::Header { build, output } => header::exec(&cli.manifest, build, output),
    }
}
