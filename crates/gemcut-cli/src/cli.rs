//! CLI argument definitions for gemcut.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gemcut",
    version,
    about = "Decide which gems each build compiles in",
    long_about = "gemcut resolves the bundle and drop policies declared for each build in \
                  Gemcut.toml into dependency-closed gem sets, checks that they do not \
                  overlap, and emits the bitmap the host build uses to prune its gem list."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the manifest
    #[arg(long, global = true, env = "GEMCUT_MANIFEST", default_value = gemcut_core::MANIFEST_FILE)]
    pub manifest: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve bundle and drop lists for every build
    Resolve {
        /// Only resolve this build
        #[arg(short, long)]
        build: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the gem tree of a build
    Tree {
        /// Build to show
        #[arg(short, long)]
        build: Option<String>,
        /// Maximum depth
        #[arg(long)]
        depth: Option<u32>,
        /// Show what depends on this gem instead
        #[arg(long, value_name = "GEM")]
        inverted: Option<String>,
    },

    /// Generate the C header describing a build's gems
    Header {
        /// Build to generate for
        #[arg(short, long)]
        build: String,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
