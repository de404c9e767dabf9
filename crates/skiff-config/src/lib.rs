//! Configuration for skiff builds.
//!
//! A configuration lists the bundler invocations to run (`builds`) and the
//! options that govern the whole session (`plugin`). It is layered with
//! figment: built-in defaults, then a `skiff.config.toml` or
//! `skiff.config.json` file, then `SKIFF_`-prefixed environment variables.
//!
//! ```toml
//! [plugin]
//! concurrency = 2
//!
//! [[builds]]
//! name = "api"
//! command = ["npx", "webpack", "--json", "--config", "api.webpack.js"]
//! output_path = ".webpack/api"
//! ```

pub mod config;
pub mod discovery;
pub mod error;
mod loading;
pub mod validation;

pub use config::{BuildTarget, PluginConfiguration, SkiffConfig};
pub use discovery::{CONFIG_FILE_NAMES, ConfigDiscovery, discover};
pub use error::{ConfigError, Result};
pub use loading::ENV_PREFIX;
