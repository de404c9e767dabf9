use std::path::{Path, PathBuf};

use skiff_config::{ConfigDiscovery, SkiffConfig};

use crate::cli::{BuildArgs, ProjectArgs};
use crate::error::Result;

/// A loaded configuration and the directory its paths are relative to.
#[derive(Debug, Clone)]
pub struct Project {
    pub config: SkiffConfig,
    pub config_path: PathBuf,
    pub base: PathBuf,
}

impl Project {
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let root = match &args.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir()?,
        };
        let config_path = ConfigDiscovery::new(&root).locate(args.config.as_deref())?;
        let base = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(root);
        let config = SkiffConfig::load(&config_path)?;

        tracing::debug!(
            config = %config_path.display(),
            builds = config.builds.len(),
            "loaded project"
        );
        Ok(Self {
            config,
            config_path,
            base,
        })
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn with_build_args(mut self, args: &BuildArgs) -> Self {
        if args.concurrency.is_some() || args.keep_output {
            let plugin = self.config.plugin.get_or_insert_with(Default::default);
            if let Some(concurrency) = args.concurrency {
                plugin.concurrency = usize::try_from(concurrency).ok();
            }
            if args.keep_output {
                plugin.keep_output_directory = true;
            }
        }
        self
    }

    /// Output directory of every build, anchored at the project base.
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        self.config
            .builds
            .iter()
            .map(|b| b.resolved_output_path(&self.base))
            .collect()
    }
}
