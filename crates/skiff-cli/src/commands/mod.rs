//! Command implementations.
//!
//! Each command exposes an `execute` function taking its parsed arguments.

pub mod build;
pub mod clean;
pub mod inspect;
pub mod watch;
mod project;

pub use build::execute as build_execute;
pub use clean::execute as clean_execute;
pub use inspect::execute as inspect_execute;
pub use project::Project;
pub use watch::execute as watch_execute;
