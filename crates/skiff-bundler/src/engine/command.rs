//! Engine that shells out to a bundler which prints JSON stats.
//!
//! Bundlers usually exit non-zero when compilation fails, yet still print
//! complete stats. The exit status is therefore only consulted when stdout
//! does not parse.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use super::{BuildEngine, EngineError, EngineOutput};
use crate::stats::{Compilation, StatsSnapshot};

/// One bundler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    pub name: String,
    /// Program followed by its arguments.
    pub command: Vec<String>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    /// Used when the stats do not report an output path.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(".webpack")
}

impl CommandSpec {
    pub fn new<I, S>(name: impl Into<String>, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            command: command.into_iter().map(Into::into).collect(),
            cwd: None,
            output_path: default_output_path(),
        }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    fn display(&self) -> String {
        self.command.join(" ")
    }
}

/// Runs [`CommandSpec`]s as child processes and parses their stdout.
#[derive(Debug, Clone, Default)]
pub struct CommandEngine {
    envs: Vec<(String, String)>,
}

impl CommandEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable to every spawned bundler.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

#[async_trait]
impl BuildEngine for CommandEngine {
    type Config = CommandSpec;
    type Stats = Compilation;

    async fn run(&self, spec: &CommandSpec) -> Result<EngineOutput<Compilation>, EngineError> {
        let Some((program, args)) = spec.command.split_first() else {
            return Err(EngineError::InvalidConfig(format!(
                "build '{}' has an empty command",
                spec.name
            )));
        };

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &spec.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }

        tracing::debug!(build = %spec.name, command = %spec.display(), "spawning bundler");
        let output = command.output().await.map_err(|source| EngineError::Spawn {
            command: spec.display(),
            source,
        })?;

        let snapshot = match serde_json::from_slice::<StatsSnapshot>(&output.stdout) {
            Ok(snapshot) => snapshot,
            Err(_) if !output.status.success() => {
                return Err(EngineError::Failed {
                    command: spec.display(),
                    status: output.status.to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                });
            }
            Err(source) => {
                return Err(EngineError::InvalidStats {
                    command: spec.display(),
                    source,
                });
            }
        };

        let default_output = resolve_output(spec);
        Ok(Compilation::from_engine_snapshot(snapshot, &default_output)?)
    }
}

fn resolve_output(spec: &CommandSpec) -> PathBuf {
    match &spec.cwd {
        Some(cwd) if spec.output_path.is_relative() => cwd.join(&spec.output_path),
        _ => spec.output_path.clone(),
    }
}

/// Parse stats printed by a bundler, outside of a process invocation.
pub fn parse_stats(json: &str, default_output: &Path) -> Result<EngineOutput<Compilation>, EngineError> {
    let snapshot: StatsSnapshot =
        serde_json::from_str(json).map_err(|source| EngineError::InvalidStats {
            command: "<stats>".to_string(),
            source,
        })?;
    Ok(Compilation::from_engine_snapshot(snapshot, default_output)?)
}
