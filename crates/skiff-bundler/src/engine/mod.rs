//! Bundler engine collaborator.
//!
//! The engine compiles one configuration and reports the resulting stats.
//! Engines that can compile several configurations in one invocation
//! ("multi-compiler") return [`EngineOutput::Multi`]; callers always go
//! through [`EngineOutput::into_vec`] and never branch on the shape.

mod command;

pub use command::{CommandEngine, CommandSpec, parse_stats};

use async_trait::async_trait;

use crate::stats::CompilationStats;

/// A bundler that can compile a configuration.
///
/// Implementations must tolerate concurrent `run` calls for independent
/// configurations.
#[async_trait]
pub trait BuildEngine: Send + Sync + 'static {
    /// Configuration accepted by the engine.
    type Config: Send + Sync + 'static;

    /// Stats reported per compilation.
    type Stats: CompilationStats;

    async fn run(&self, config: &Self::Config) -> Result<EngineOutput<Self::Stats>, EngineError>;
}

/// Result of one engine invocation.
#[derive(Debug, Clone)]
pub enum EngineOutput<S> {
    Single(S),
    Multi(Vec<S>),
}

impl<S> EngineOutput<S> {
    /// Normalize to a sequence of compilations, in engine order.
    pub fn into_vec(self) -> Vec<S> {
        match self {
            EngineOutput::Single(stats) => vec![stats],
            EngineOutput::Multi(stats) => stats,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EngineOutput::Single(_) => 1,
            EngineOutput::Multi(stats) => stats.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Engine-level failure: the engine could not produce stats at all.
///
/// Compiler errors are not engine errors; they are part of the stats.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status} without printing stats{}", format_stderr(.stderr))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` printed invalid stats: {source}")]
    InvalidStats {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid module graph in stats: {0}")]
    Graph(#[from] skiff_graph::Error),

    #[error("Invalid build configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}
