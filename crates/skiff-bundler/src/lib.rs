#![cfg_attr(docsrs, feature(doc_cfg))]

//! # skiff-bundler
//!
//! Runs one or more bundler configurations, optionally concurrently, and
//! turns every completed compilation into a [`BuildResult`]: its output
//! directory, the externals it left out of the bundle (with the first-party
//! module that introduced each one) and its formatted compiler errors.
//!
//! The bundler itself is a collaborator behind the [`BuildEngine`] trait.
//! [`CommandEngine`] drives any bundler that can print JSON stats; tests and
//! embedders can supply their own engine.
//!
//! ## Quick Start
//!
//! ```no_run
//! use skiff_bundler::{
//!     BuildRunner, CommandEngine, CommandSpec, Compilation, Concurrency, Session, SessionOptions,
//! };
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let configs = vec![
//!     CommandSpec::new("api", ["npx", "webpack", "--json", "--config", "api.webpack.js"]),
//!     CommandSpec::new("worker", ["npx", "webpack", "--json", "--config", "worker.webpack.js"]),
//! ];
//!
//! let runner = BuildRunner::new(Arc::new(CommandEngine::new()))
//!     .reporter(Arc::new(|stats: &Compilation| println!("built {}", stats.name())));
//!
//! let outcome = Session::new(configs)
//!     .with_options(SessionOptions { concurrency: Concurrency::limited(2) })
//!     .run(&runner)
//!     .await?;
//!
//! for record in outcome.external_modules() {
//!     println!("{} (from {:?})", record.external, record.origin);
//! }
//! # Ok(()) }
//! ```

pub mod engine;
pub mod extract;
pub mod runner;
pub mod session;
pub mod stats;

pub use engine::{BuildEngine, CommandEngine, CommandSpec, EngineError, EngineOutput, parse_stats};
pub use extract::{BuildResult, ExternalRecord, Extractor, format_error_text};
pub use runner::{BuildRunner, Concurrency, StatsReporter};
pub use session::{Session, SessionError, SessionOptions, SessionOutcome};
pub use stats::{Compilation, CompilationStats, StatsDiagnostic, StatsOptions, StatsSnapshot};

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

/// Error types for skiff-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bundler engine rejected a configuration.
    #[error("Bundler engine error: {0}")]
    Engine(#[from] EngineError),

    /// The compilation's module graph violated the engine contract.
    #[error(transparent)]
    Graph(#[from] skiff_graph::Error),

    /// A build task panicked before producing a result.
    #[error("Build task panicked: {0}")]
    TaskPanicked(String),
}

/// Result type alias for skiff-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;
