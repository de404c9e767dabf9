//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no skiff.config.toml or skiff.config.json found in {0}")]
    NotFound(PathBuf),

    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(Box<figment::Error>),

    #[error("invalid value for `{field}`: {hint}")]
    InvalidValue { field: String, hint: String },

    #[error("no builds configured")]
    NoBuilds,

    #[error("duplicate build name: {0}")]
    DuplicateBuild(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Invalid(Box::new(err))
    }
}
