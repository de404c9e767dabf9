//! Per-build stats logging and external dependency manifests.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use serde::Serialize;
use skiff_bundler::{BuildResult, Compilation, CompilationStats, ExternalRecord, StatsOptions};

/// Logs every compilation as it completes.
///
/// With a stats preset, the full rendering for that preset is printed.
/// Without one only the warnings are logged, with their `WARNING ` labels
/// dropped and continuation lines indented.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsLogger {
    preset: Option<StatsOptions>,
    colors: bool,
}

impl StatsLogger {
    pub fn new(preset: Option<StatsOptions>, colors: bool) -> Self {
        Self { preset, colors }
    }

    pub fn log(&self, stats: &Compilation) {
        match self.preset {
            Some(preset) => {
                let rendered = stats.render(&preset.with_colors(preset.colors || self.colors));
                if !rendered.is_empty() {
                    eprintln!("{rendered}");
                }
            }
            None => {
                if let Some(warnings) = format_warnings(&stats.render(&StatsOptions::warnings_only())) {
                    tracing::warn!("{}\n  {}", stats.name(), warnings);
                }
            }
        }
    }
}

/// Strip `WARNING ` labels and indent continuation lines.
pub fn format_warnings(rendered: &str) -> Option<String> {
    let text = rendered.replace("WARNING ", "");
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.split('\n').collect::<Vec<_>>().join("\n  "))
}

/// Machine-readable summary of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub succeeded: bool,
    pub builds: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub output_path: PathBuf,
    pub external_modules: Vec<ExternalRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Manifest {
    pub fn from_results(results: &[BuildResult]) -> Self {
        Self {
            succeeded: results.iter().all(BuildResult::is_ok),
            builds: results
                .iter()
                .map(|r| ManifestEntry {
                    output_path: r.output_path.clone(),
                    external_modules: r.external_modules.iter().cloned().collect(),
                    error: r.error().map(str::to_string),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Human-readable listing of each build's externals.
pub fn render_summary(results: &[BuildResult], colors: bool) -> String {
    let mut out = String::new();
    for result in results {
        let path = result.output_path.display().to_string();
        if colors {
            out.push_str(&path.bold().to_string());
        } else {
            out.push_str(&path);
        }
        out.push('\n');

        if result.external_modules.is_empty() {
            out.push_str("  no external modules\n");
            continue;
        }
        for record in &result.external_modules {
            match &record.origin {
                Some(origin) if colors => {
                    out.push_str(&format!("  {} {}\n", record.external, format!("(from {origin})").dimmed()));
                }
                Some(origin) => out.push_str(&format!("  {} (from {origin})\n", record.external)),
                None => out.push_str(&format!("  {}\n", record.external)),
            }
        }
    }
    out
}
