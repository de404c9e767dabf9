//! Skiff CLI: run every configured bundler build, report each build's
//! stats, and print the external dependencies each bundle needs at deploy
//! time.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - `build`, `watch`, `clean` and `inspect`
//! - [`error`] - error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`report`] - stats logging and external manifests
//! - [`cleanup`] - output directory removal
//! - [`watch`] - filesystem watching for rebuilds
//! - [`ui`] - status messages

pub mod cleanup;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod report;
pub mod ui;
pub mod watch;

pub use error::{CliError, Result, ResultExt};
