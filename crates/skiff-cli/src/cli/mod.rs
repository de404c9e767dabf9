//! Command-line interface definition.
//!
//! - `skiff build` - run every configured build once
//! - `skiff watch` - rebuild on source changes
//! - `skiff clean` - remove build output directories
//! - `skiff inspect` - report externals from a saved stats file

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, CleanArgs, Command, InspectArgs, ProjectArgs, WatchArgs};

/// Skiff - concurrent bundler builds with external dependency manifests
#[derive(Parser, Debug)]
#[command(
    name = "skiff",
    version,
    about = "Run bundler builds concurrently and report their external dependencies",
    long_about = "Skiff runs every bundler configuration of a project, optionally in parallel,\n\
                  reports each build's warnings and errors, and lists the external packages\n\
                  every bundle needs installed next to it at deploy time."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
