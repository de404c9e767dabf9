//! Conversion of CLI errors into miette reports.

use miette::{MietteDiagnostic, Report};
use skiff_bundler::SessionError;
use skiff_config::ConfigError;

use crate::error::CliError;

pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Session(SessionError::Build { message, outcome }) => {
            let failed = outcome.failed().count();
            let diagnostic = MietteDiagnostic::new(format!("Compilation failed:\n\n{message}"))
                .with_code("skiff::build")
                .with_help(format!(
                    "{failed} of {} build(s) reported errors",
                    outcome.results().len()
                ));
            Report::new(diagnostic)
        }
        CliError::Session(SessionError::Configuration(message)) => Report::new(
            MietteDiagnostic::new(message)
                .with_code("skiff::config")
                .with_help("add a [plugin] section to the skiff config"),
        ),
        CliError::Config(ConfigError::NotFound(dir)) => Report::new(
            MietteDiagnostic::new(format!(
                "no skiff.config.toml or skiff.config.json found in {}",
                dir.display()
            ))
            .with_code("skiff::config")
            .with_help("create a config file or pass --config <path>"),
        ),
        CliError::Config(e) => Report::new(
            MietteDiagnostic::new(format!("Configuration error: {e}")).with_code("skiff::config"),
        ),
        other => miette::miette!("{}", other),
    }
}
