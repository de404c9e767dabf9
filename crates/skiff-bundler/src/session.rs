//! Build session controller.
//!
//! A [`Session`] owns the ordered configurations of one build and the plugin
//! options that govern it. Running it builds everything, then fails once
//! with every build's errors if any compilation reported one.

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;
use skiff_graph::BuiltinRegistry;

use crate::engine::BuildEngine;
use crate::extract::{BuildResult, ExternalRecord};
use crate::runner::{BuildRunner, Concurrency};

/// Options that govern a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub concurrency: Concurrency,
}

/// One build session.
#[derive(Debug, Clone)]
pub struct Session<C> {
    configs: Vec<C>,
    options: Option<SessionOptions>,
}

impl<C> Session<C> {
    pub fn new(configs: Vec<C>) -> Self {
        Self {
            configs,
            options: None,
        }
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn configs(&self) -> &[C] {
        &self.configs
    }

    /// Build every configuration.
    ///
    /// Fails before the engine is invoked when the session has no options
    /// or no configurations.
    pub async fn run<E, R>(self, runner: &BuildRunner<E, R>) -> Result<SessionOutcome, SessionError>
    where
        E: BuildEngine<Config = C>,
        R: BuiltinRegistry + 'static,
    {
        let Some(options) = self.options else {
            return Err(SessionError::Configuration(
                "Missing plugin configuration".to_string(),
            ));
        };
        if self.configs.is_empty() {
            return Err(SessionError::Configuration(
                "No build configurations to run".to_string(),
            ));
        }

        let results = runner.run_all(self.configs, options.concurrency).await?;
        let outcome = SessionOutcome { results };

        match outcome.error_text() {
            Some(message) => {
                tracing::debug!(
                    failed = outcome.failed().count(),
                    "session finished with compilation errors"
                );
                Err(SessionError::Build {
                    message,
                    outcome: Box::new(outcome),
                })
            }
            None => Ok(outcome),
        }
    }
}

/// Results of every compilation of a session, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    results: Vec<BuildResult>,
}

impl SessionOutcome {
    pub fn new(results: Vec<BuildResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[BuildResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<BuildResult> {
        self.results
    }

    pub fn succeeded(&self) -> bool {
        self.results.iter().all(BuildResult::is_ok)
    }

    pub fn failed(&self) -> impl Iterator<Item = &BuildResult> {
        self.results.iter().filter(|r| !r.is_ok())
    }

    /// Every non-empty build error, separated by a blank line.
    pub fn error_text(&self) -> Option<String> {
        let errors: Vec<&str> = self.results.iter().filter_map(BuildResult::error).collect();
        if errors.is_empty() {
            None
        } else {
            Some(errors.join("\n\n"))
        }
    }

    /// Externals across all compilations, first occurrence wins.
    pub fn external_modules(&self) -> IndexSet<&ExternalRecord> {
        self.results
            .iter()
            .flat_map(|r| r.external_modules.iter())
            .collect()
    }
}

/// Why a session did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Required session input was missing; nothing was built.
    #[error("{0}")]
    Configuration(String),

    /// At least one compilation reported errors. The outcome still carries
    /// every result, including successful ones.
    #[error("Compilation failed:\n\n{message}")]
    Build {
        message: String,
        outcome: Box<SessionOutcome>,
    },

    /// A build could not produce stats at all.
    #[error(transparent)]
    Runner(#[from] crate::Error),
}

impl SessionError {
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        match self {
            SessionError::Build { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, result) in self.results.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} ({} external{})",
                result.output_path.display(),
                result.external_modules.len(),
                if result.external_modules.len() == 1 { "" } else { "s" }
            )?;
        }
        Ok(())
    }
}
