use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format as _, Json, Serialized, Toml};

use crate::config::SkiffConfig;
use crate::error::{ConfigError, Result};

/// Prefix of environment overrides, e.g. `SKIFF_PLUGIN__CONCURRENCY=4`.
pub const ENV_PREFIX: &str = "SKIFF_";

impl SkiffConfig {
    /// Layered sources for `file`: defaults, then the file, then the
    /// environment.
    pub fn figment(file: &Path) -> Result<Figment> {
        let figment = Figment::new().merge(Serialized::defaults(SkiffConfig::default()));
        let figment = match file.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment.merge(Toml::file_exact(file)),
            Some("json") => figment.merge(Json::file_exact(file)),
            _ => return Err(ConfigError::UnsupportedFormat(file.to_path_buf())),
        };
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load and validate the configuration in `file`.
    pub fn load(file: &Path) -> Result<Self> {
        if !file.is_file() {
            return Err(ConfigError::FileNotFound(file.to_path_buf()));
        }
        let config: SkiffConfig = Self::figment(file)?.extract()?;
        config.validate()?;

        tracing::debug!(
            path = %file.display(),
            builds = config.builds.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parse TOML text without any other layer. Not validated.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(Figment::from(Serialized::defaults(SkiffConfig::default()))
            .merge(Toml::string(content))
            .extract()?)
    }
}
