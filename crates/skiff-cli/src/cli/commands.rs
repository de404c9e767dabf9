use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every configured build once
    ///
    /// Stale output directories are removed first unless the plugin
    /// configuration (or --keep-output) says to keep them.
    ///
    /// Each build command must print its stats as JSON on stdout
    /// (webpack --json). Origins are traced through each module's
    /// `rawRequest`, or the `userRequest` of its `reasons` when that is
    /// missing, so keep module reasons enabled in the stats output.
    Build(BuildArgs),

    /// Build, then rebuild whenever sources change
    ///
    /// The first build only arms the watcher; every later rebuild runs the
    /// --exec command, if any.
    Watch(WatchArgs),

    /// Remove the output directory of every configured build
    Clean(CleanArgs),

    /// Report the externals recorded in a saved stats file
    ///
    /// Reads the JSON a bundler printed with --json and runs the same
    /// classification a build would.
    Inspect(InspectArgs),
}

/// Where to find the project and its configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Config file (default: skiff.config.toml or skiff.config.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project directory (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Maximum number of builds running at once
    #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: Option<u64>,

    /// Keep existing output directories
    #[arg(long)]
    pub keep_output: bool,

    /// Print the external dependency manifest as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WatchArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Command to run after every rebuild
    #[arg(long, value_name = "COMMAND")]
    pub exec: Option<String>,

    /// Poll for changes instead of using native events (interval in ms)
    #[arg(
        long,
        value_name = "MS",
        num_args = 0..=1,
        default_missing_value = "3000",
    )]
    pub poll: Option<u64>,

    /// Quiet period after a change before rebuilding (ms)
    #[arg(long, value_name = "MS", default_value_t = 200)]
    pub debounce: u64,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CleanArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Stats JSON printed by the bundler
    #[arg(value_name = "STATS")]
    pub stats: PathBuf,

    /// Print the manifest as JSON
    #[arg(long)]
    pub json: bool,
}
