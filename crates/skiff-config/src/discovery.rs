//! Config file discovery.

use std::path::{Path, PathBuf};

use crate::config::SkiffConfig;
use crate::error::{ConfigError, Result};

/// File names searched for, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["skiff.config.toml", "skiff.config.json"];

/// Finds and loads the configuration of a project directory.
///
/// ```no_run
/// use skiff_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First conventional config file present in the root.
    pub fn find(&self) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }

    /// The explicit path if given (relative to the root), otherwise the
    /// discovered one.
    pub fn locate(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => {
                let path = self.root.join(path);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(ConfigError::FileNotFound(path))
                }
            }
            None => self
                .find()
                .ok_or_else(|| ConfigError::NotFound(self.root.clone())),
        }
    }

    pub fn load(&self) -> Result<SkiffConfig> {
        let path = self.locate(None)?;
        SkiffConfig::load(&path)
    }
}

/// Discover and load the config of the current directory.
pub fn discover() -> Result<SkiffConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(root).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_without_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn toml_wins_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("skiff.config.json"), "{}").unwrap();
        fs::write(dir.path().join("skiff.config.toml"), "").unwrap();

        let found = ConfigDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(found, dir.path().join("skiff.config.toml"));
    }

    #[test]
    fn missing_explicit_path_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = ConfigDiscovery::new(dir.path())
            .locate(Some(Path::new("custom.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_without_config_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
