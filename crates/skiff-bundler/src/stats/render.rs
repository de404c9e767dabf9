use std::str::FromStr;

use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use super::{Compilation, StatsDiagnostic};

/// Controls the text rendering of compilation stats.
///
/// The default matches the reporter's normal output: errors and warnings,
/// no hash, no version, no child compilations, no colors.
///
/// Deserializes from the field form, a preset name (`"errors-only"`,
/// `"verbose"`, ...) or a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStatsOptions", rename_all = "camelCase")]
pub struct StatsOptions {
    pub colors: bool,
    pub hash: bool,
    pub version: bool,
    pub errors: bool,
    pub warnings: bool,
    pub children: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            colors: false,
            hash: false,
            version: false,
            errors: true,
            warnings: true,
            children: false,
        }
    }
}

impl StatsOptions {
    /// Renders nothing.
    pub fn silent() -> Self {
        Self {
            errors: false,
            ..Self::none()
        }
    }

    /// Nothing but error blocks, child compilations included.
    pub fn errors_only() -> Self {
        Self {
            warnings: false,
            ..Self::none()
        }
    }

    /// Nothing but warning blocks, child compilations included.
    pub fn warnings_only() -> Self {
        Self {
            errors: false,
            warnings: true,
            ..Self::none()
        }
    }

    /// Everything, for verbose reporting.
    pub fn verbose() -> Self {
        Self {
            colors: false,
            hash: true,
            version: true,
            errors: true,
            warnings: true,
            children: true,
        }
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    fn none() -> Self {
        Self {
            colors: false,
            hash: false,
            version: false,
            errors: true,
            warnings: false,
            children: true,
        }
    }
}

impl FromStr for StatsOptions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" | "errors-warnings" => Ok(Self::default()),
            "errors-only" => Ok(Self::errors_only()),
            "warnings-only" => Ok(Self::warnings_only()),
            "verbose" | "detailed" => Ok(Self::verbose()),
            "none" => Ok(Self::silent()),
            other => Err(format!("unknown stats preset `{other}`")),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatsOptions {
    Enabled(bool),
    Preset(String),
    Fields(StatsFields),
}

#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatsFields {
    colors: bool,
    hash: bool,
    version: bool,
    errors: bool,
    warnings: bool,
    children: bool,
}

impl Default for StatsFields {
    fn default() -> Self {
        let StatsOptions {
            colors,
            hash,
            version,
            errors,
            warnings,
            children,
        } = StatsOptions::default();
        Self {
            colors,
            hash,
            version,
            errors,
            warnings,
            children,
        }
    }
}

impl TryFrom<RawStatsOptions> for StatsOptions {
    type Error = String;

    fn try_from(raw: RawStatsOptions) -> Result<Self, Self::Error> {
        match raw {
            RawStatsOptions::Enabled(true) => Ok(Self::default()),
            RawStatsOptions::Enabled(false) => Ok(Self::silent()),
            RawStatsOptions::Preset(name) => name.parse(),
            RawStatsOptions::Fields(f) => Ok(Self {
                colors: f.colors,
                hash: f.hash,
                version: f.version,
                errors: f.errors,
                warnings: f.warnings,
                children: f.children,
            }),
        }
    }
}

#[derive(Clone, Copy)]
enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self, colors: bool) -> String {
        match (self, colors) {
            (Severity::Error, false) => "ERROR".to_string(),
            (Severity::Warning, false) => "WARNING".to_string(),
            (Severity::Error, true) => "ERROR".red().bold().to_string(),
            (Severity::Warning, true) => "WARNING".yellow().bold().to_string(),
        }
    }
}

pub(super) fn render(compilation: &Compilation, options: &StatsOptions) -> String {
    let mut blocks: Vec<String> = Vec::new();

    let mut header = Vec::new();
    if let Some(hash) = compilation.hash().filter(|_| options.hash) {
        header.push(format!("Hash: {hash}"));
    }
    if let Some(version) = compilation.version().filter(|_| options.version) {
        header.push(format!("Version: {version}"));
    }
    if !header.is_empty() {
        blocks.push(header.join("\n"));
    }

    if options.errors {
        blocks.extend(
            compilation
                .errors()
                .iter()
                .map(|d| render_diagnostic(Severity::Error, d, options.colors)),
        );
    }
    if options.warnings {
        blocks.extend(
            compilation
                .warnings()
                .iter()
                .map(|d| render_diagnostic(Severity::Warning, d, options.colors)),
        );
    }

    if options.children {
        for child in compilation.children() {
            let body = render(child, options);
            if body.is_empty() {
                continue;
            }
            let indented = body
                .lines()
                .map(|line| format!("    {line}"))
                .collect::<Vec<_>>()
                .join("\n");
            blocks.push(format!("Child {}:\n{indented}", child.name()));
        }
    }

    blocks.join("\n\n")
}

fn render_diagnostic(severity: Severity, diagnostic: &StatsDiagnostic, colors: bool) -> String {
    let label = severity.label(colors);
    match (&diagnostic.module_name, &diagnostic.loc) {
        (Some(module), Some(loc)) => format!("{label} in {module} {loc}\n{}", diagnostic.message),
        (Some(module), None) => format!("{label} in {module}\n{}", diagnostic.message),
        _ => format!("{label} {}", diagnostic.message),
    }
}
