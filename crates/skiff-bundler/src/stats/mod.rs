//! Compilation stats produced by the bundler engine.
//!
//! - [`StatsSnapshot`]: the serialized stats shape an engine prints
//!   (webpack `--json` compatible subset).
//! - [`Compilation`]: a parsed snapshot with its module graph materialized.
//! - [`StatsOptions`]: what a text rendering of the stats includes.

mod render;
mod snapshot;

pub use render::StatsOptions;
pub use snapshot::{ModuleReason, ModuleRecord, StatsDiagnostic, StatsSnapshot};

use std::path::{Path, PathBuf};

use skiff_graph::{Module, ModuleGraph, ModuleId};

use crate::engine::EngineOutput;

/// Read access to one completed compilation.
///
/// This is the raw stats object handed to stats reporters and to the
/// result extractor.
pub trait CompilationStats: Send + Sync + 'static {
    /// Directory the compilation wrote its bundle to.
    fn output_path(&self) -> &Path;

    fn module_graph(&self) -> &ModuleGraph;

    /// Human-readable rendering restricted by `options`.
    fn render(&self, options: &StatsOptions) -> String;

    fn has_errors(&self) -> bool;

    fn has_warnings(&self) -> bool;
}

/// A completed compilation parsed from a [`StatsSnapshot`].
#[derive(Debug, Clone)]
pub struct Compilation {
    name: Option<String>,
    hash: Option<String>,
    version: Option<String>,
    output_path: PathBuf,
    graph: ModuleGraph,
    errors: Vec<StatsDiagnostic>,
    warnings: Vec<StatsDiagnostic>,
    children: Vec<Compilation>,
}

impl Compilation {
    /// Materialize a snapshot. `default_output` is used when the snapshot
    /// does not carry an output path.
    ///
    /// Issuers that reference a module missing from the snapshot are
    /// dropped; the module is then treated as a top-level import.
    pub fn from_snapshot(snapshot: StatsSnapshot, default_output: &Path) -> skiff_graph::Result<Self> {
        let mut graph = ModuleGraph::new();
        for record in &snapshot.modules {
            let mut module = Module::new(record.identifier.as_str());
            module.raw_request = record.request().map(str::to_string);
            graph.add_module(module)?;
        }

        for record in &snapshot.modules {
            let Some(issuer) = &record.issuer else {
                continue;
            };
            let issuer = ModuleId::new(issuer.as_str());
            if !graph.contains(&issuer) {
                tracing::debug!(
                    module = %record.identifier,
                    issuer = %issuer,
                    "issuer not present in stats, treating module as top-level"
                );
                continue;
            }
            graph.set_issuer(&ModuleId::new(record.identifier.as_str()), &issuer)?;
        }

        let output_path = snapshot
            .output_path
            .unwrap_or_else(|| default_output.to_path_buf());

        let children = snapshot
            .children
            .into_iter()
            .map(|child| Compilation::from_snapshot(child, &output_path))
            .collect::<skiff_graph::Result<Vec<_>>>()?;

        Ok(Self {
            name: snapshot.name,
            hash: snapshot.hash,
            version: snapshot.version,
            output_path,
            graph,
            errors: snapshot.errors,
            warnings: snapshot.warnings,
            children,
        })
    }

    /// Normalize a snapshot into engine output.
    ///
    /// A snapshot whose only content is a `children` array is a
    /// multi-compiler run: every child becomes its own compilation.
    pub fn from_engine_snapshot(
        snapshot: StatsSnapshot,
        default_output: &Path,
    ) -> skiff_graph::Result<EngineOutput<Self>> {
        if snapshot.is_multi_compiler() {
            let compilations = snapshot
                .children
                .into_iter()
                .map(|child| Compilation::from_snapshot(child, default_output))
                .collect::<skiff_graph::Result<Vec<_>>>()?;
            return Ok(EngineOutput::Multi(compilations));
        }
        Ok(EngineOutput::Single(Compilation::from_snapshot(
            snapshot,
            default_output,
        )?))
    }

    /// Compilation name, falling back to the output directory.
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.output_path.display().to_string())
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn errors(&self) -> &[StatsDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[StatsDiagnostic] {
        &self.warnings
    }

    pub fn children(&self) -> &[Compilation] {
        &self.children
    }
}

impl CompilationStats for Compilation {
    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn module_graph(&self) -> &ModuleGraph {
        &self.graph
    }

    fn render(&self, options: &StatsOptions) -> String {
        render::render(self, options)
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.children.iter().any(|c| c.has_errors())
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty() || self.children.iter().any(|c| c.has_warnings())
    }
}
