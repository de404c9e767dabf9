//! Schema checks that do not touch the filesystem.

use std::collections::HashSet;

use crate::config::{BuildTarget, SkiffConfig};
use crate::error::{ConfigError, Result};

impl SkiffConfig {
    pub fn validate(&self) -> Result<()> {
        if self.builds.is_empty() {
            return Err(ConfigError::NoBuilds);
        }

        let mut names = HashSet::new();
        for build in &self.builds {
            validate_build(build)?;
            if !names.insert(build.name.as_str()) {
                return Err(ConfigError::DuplicateBuild(build.name.clone()));
            }
        }

        if let Some(plugin) = &self.plugin {
            if plugin.concurrency == Some(0) {
                return Err(ConfigError::InvalidValue {
                    field: "plugin.concurrency".to_string(),
                    hint: "must be at least 1; leave it unset for no limit".to_string(),
                });
            }
        }

        Ok(())
    }
}

pub fn validate_build(build: &BuildTarget) -> Result<()> {
    if build.name.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "builds.name".to_string(),
            hint: "build names cannot be empty".to_string(),
        });
    }
    if build.command.first().is_none_or(|program| program.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: format!("builds.{}.command", build.name),
            hint: "provide the bundler program and its arguments".to_string(),
        });
    }
    Ok(())
}
