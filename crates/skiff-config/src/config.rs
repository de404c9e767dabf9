//! Configuration model.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skiff_bundler::{CommandSpec, Concurrency, SessionOptions, StatsOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkiffConfig {
    #[serde(default)]
    pub builds: Vec<BuildTarget>,

    /// Options governing the whole session. Builds refuse to start
    /// without them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<PluginConfiguration>,
}

impl Default for SkiffConfig {
    fn default() -> Self {
        Self {
            builds: Vec::new(),
            plugin: Some(PluginConfiguration::default()),
        }
    }
}

/// One bundler invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildTarget {
    pub name: String,

    /// Program and arguments. The program must print JSON stats on stdout.
    pub command: Vec<String>,

    /// Working directory, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Where the bundle is written when the stats do not say. Defaults to
    /// `.webpack/<name>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Stats preset used when reporting this build: a preset name such as
    /// `"errors-only"`, a boolean, or a table of fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfiguration {
    /// Maximum builds in flight. Unset means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Leave build output directories in place.
    pub keep_output_directory: bool,
}

impl PluginConfiguration {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            concurrency: self
                .concurrency
                .map_or(Concurrency::Unbounded, Concurrency::limited),
        }
    }
}

impl BuildTarget {
    pub fn new<I, S>(name: impl Into<String>, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            command: command.into_iter().map(Into::into).collect(),
            cwd: None,
            output_path: None,
            stats: None,
        }
    }

    /// Output directory, relative to the working directory unless absolute.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| Path::new(".webpack").join(&self.name))
    }

    /// Output directory as seen from `base`.
    pub fn resolved_output_path(&self, base: &Path) -> PathBuf {
        let output = self.output_path();
        if output.is_absolute() {
            return output;
        }
        match &self.cwd {
            Some(cwd) => base.join(cwd).join(output),
            None => base.join(output),
        }
    }

    /// Engine invocation with paths anchored at `base`.
    pub fn to_command_spec(&self, base: &Path) -> CommandSpec {
        let cwd = match &self.cwd {
            Some(cwd) => base.join(cwd),
            None => base.to_path_buf(),
        };
        CommandSpec::new(self.name.clone(), self.command.iter().cloned())
            .cwd(cwd)
            .output_path(self.output_path())
    }
}

impl SkiffConfig {
    /// Session options, if the plugin section is present.
    pub fn session_options(&self) -> Option<SessionOptions> {
        self.plugin.as_ref().map(PluginConfiguration::session_options)
    }

    pub fn keep_output_directory(&self) -> bool {
        self.plugin.as_ref().is_some_and(|p| p.keep_output_directory)
    }

    /// Stats preset of the first build, shared by the reporter.
    pub fn stats_options(&self) -> Option<StatsOptions> {
        self.builds.first().and_then(|b| b.stats)
    }

    pub fn command_specs(&self, base: &Path) -> Vec<CommandSpec> {
        self.builds.iter().map(|b| b.to_command_spec(base)).collect()
    }

    pub fn build(&self, name: &str) -> Option<&BuildTarget> {
        self.builds.iter().find(|b| b.name == name)
    }

    /// Example configuration for `skiff init`-style scaffolding and docs.
    pub fn example() -> Self {
        Self {
            builds: vec![
                BuildTarget {
                    output_path: Some(PathBuf::from(".webpack/api")),
                    ..BuildTarget::new(
                        "api",
                        ["npx", "webpack", "--json", "--config", "api.webpack.js"],
                    )
                },
                BuildTarget {
                    stats: Some(StatsOptions::errors_only()),
                    ..BuildTarget::new(
                        "worker",
                        ["npx", "webpack", "--json", "--config", "worker.webpack.js"],
                    )
                },
            ],
            plugin: Some(PluginConfiguration {
                concurrency: Some(2),
                keep_output_directory: false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_defaults_under_webpack_dir() {
        let target = BuildTarget::new("api", ["webpack"]);
        assert_eq!(target.output_path(), PathBuf::from(".webpack/api"));
    }

    #[test]
    fn command_spec_anchors_cwd_at_base() {
        let target = BuildTarget {
            cwd: Some(PathBuf::from("services/api")),
            ..BuildTarget::new("api", ["npx", "webpack", "--json"])
        };
        let spec = target.to_command_spec(Path::new("/repo"));
        assert_eq!(spec.cwd.as_deref(), Some(Path::new("/repo/services/api")));
        assert_eq!(spec.output_path, PathBuf::from(".webpack/api"));
        assert_eq!(spec.command, vec!["npx", "webpack", "--json"]);
        assert_eq!(
            target.resolved_output_path(Path::new("/repo")),
            PathBuf::from("/repo/services/api/.webpack/api")
        );
    }

    #[test]
    fn missing_concurrency_is_unbounded() {
        let plugin = PluginConfiguration::default();
        assert_eq!(plugin.session_options().concurrency, Concurrency::Unbounded);

        let plugin = PluginConfiguration {
            concurrency: Some(3),
            ..Default::default()
        };
        assert_eq!(plugin.session_options().concurrency, Concurrency::limited(3));
    }

    #[test]
    fn absent_plugin_section_has_no_session_options() {
        let config = SkiffConfig {
            builds: Vec::new(),
            plugin: None,
        };
        assert!(config.session_options().is_none());
        assert!(!config.keep_output_directory());
    }

    #[test]
    fn stats_preset_comes_from_first_build() {
        let config = SkiffConfig::example();
        assert_eq!(config.stats_options(), None);
        assert_eq!(config.build("worker").and_then(|b| b.stats), Some(StatsOptions::errors_only()));
    }
}
