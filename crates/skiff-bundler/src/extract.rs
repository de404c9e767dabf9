//! Per-build result extraction.
//!
//! Turns the stats of one completed compilation into a [`BuildResult`]:
//! where the bundle was written, which externals it needs at deploy time
//! (and which first-party module introduced each), and the compiler errors
//! formatted for the session error surface.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use skiff_graph::{
    BuiltinRegistry, Error as GraphError, ModuleClassifier, ModuleGraph, NodeBuiltins,
    trace_origin,
};

use crate::Result;
use crate::stats::{CompilationStats, StatsOptions};

/// An external package together with the module that introduced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExternalRecord {
    /// Raw request of the originating first-party module, `None` for direct
    /// imports of a top-level entry.
    pub origin: Option<String>,
    /// Canonical package name.
    pub external: String,
}

impl ExternalRecord {
    pub fn new(origin: Option<impl Into<String>>, external: impl Into<String>) -> Self {
        Self {
            origin: origin.map(Into::into),
            external: external.into(),
        }
    }
}

impl fmt::Display for ExternalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "{} (from {})", self.external, origin),
            None => f.write_str(&self.external),
        }
    }
}

/// Outcome of one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    pub output_path: PathBuf,
    /// De-duplicated by value, in discovery order.
    pub external_modules: IndexSet<ExternalRecord>,
    /// Formatted compiler errors; empty when the build succeeded.
    pub error: String,
}

impl BuildResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }
}

/// Extracts [`BuildResult`]s from compilation stats.
#[derive(Debug, Clone, Default)]
pub struct Extractor<R = NodeBuiltins> {
    classifier: ModuleClassifier<R>,
}

impl Extractor<NodeBuiltins> {
    pub fn new() -> Self {
        Self {
            classifier: ModuleClassifier::new(),
        }
    }
}

impl<R: BuiltinRegistry> Extractor<R> {
    pub fn with_classifier(classifier: ModuleClassifier<R>) -> Self {
        Self { classifier }
    }

    /// Build the result for one compilation.
    ///
    /// Fails only when an external module's identifier is malformed.
    pub fn extract<S: CompilationStats + ?Sized>(&self, stats: &S) -> Result<BuildResult> {
        let external_modules = self.external_modules(stats.module_graph())?;
        let error = format_error_text(&stats.render(&StatsOptions::errors_only()));

        Ok(BuildResult {
            output_path: stats.output_path().to_path_buf(),
            external_modules,
            error,
        })
    }

    /// Every external of `graph` paired with its origin.
    ///
    /// An issuer chain that does not terminate leaves the origin unknown
    /// instead of failing the build.
    pub fn external_modules(&self, graph: &ModuleGraph) -> Result<IndexSet<ExternalRecord>> {
        let mut externals = IndexSet::new();

        for module in graph.modules() {
            let Some(external) = self.classifier.classify(module)? else {
                continue;
            };

            let origin = match trace_origin(graph, graph.issuer_of(module)) {
                Ok(origin) => origin.and_then(|m| m.raw_request()).map(str::to_string),
                Err(err @ GraphError::CyclicIssuer { .. }) => {
                    tracing::warn!(
                        module = %module.id(),
                        error = %err,
                        "could not trace origin of external, leaving it unknown"
                    );
                    None
                }
                Err(err) => return Err(err.into()),
            };

            externals.insert(ExternalRecord { origin, external });
        }

        Ok(externals)
    }
}

/// Format a rendered error block for the session error surface.
///
/// Drops every `ERROR ` token, trims the text and indents continuation
/// lines by two spaces.
pub fn format_error_text(rendered: &str) -> String {
    rendered
        .replace("ERROR ", "")
        .trim()
        .split('\n')
        .collect::<Vec<_>>()
        .join("\n  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use skiff_graph::{Module, ModuleId};

    fn id(s: &str) -> ModuleId {
        ModuleId::new(s)
    }

    #[test]
    fn error_text_strips_tokens_and_indents() {
        let rendered = "\nERROR in ./src/a.js 1:0\nModule not found\n\nERROR boom\n";
        assert_eq!(
            format_error_text(rendered),
            "in ./src/a.js 1:0\n  Module not found\n  \n  boom"
        );
    }

    #[test]
    fn empty_rendering_is_no_error() {
        assert_eq!(format_error_text(""), "");
        assert_eq!(format_error_text("  \n "), "");
    }

    #[test]
    fn same_package_from_same_origin_is_recorded_once() {
        let mut graph = ModuleGraph::new();
        graph
            .add_module(Module::new("/app/handler.js").with_raw_request("handler"))
            .unwrap();
        graph
            .add_module(Module::new("/app/a.js").with_raw_request("./a"))
            .unwrap();
        graph
            .add_module(Module::new("/app/b.js").with_raw_request("./b"))
            .unwrap();
        graph
            .add_module(Module::new(r#"external "lodash/merge""#).with_raw_request("lodash/merge"))
            .unwrap();
        graph
            .add_module(Module::new(r#"external "lodash/pick""#).with_raw_request("lodash/pick"))
            .unwrap();
        graph.set_issuer(&id("/app/a.js"), &id("/app/handler.js")).unwrap();
        graph.set_issuer(&id("/app/b.js"), &id("/app/handler.js")).unwrap();
        graph
            .set_issuer(&id(r#"external "lodash/merge""#), &id("/app/a.js"))
            .unwrap();
        graph
            .set_issuer(&id(r#"external "lodash/pick""#), &id("/app/b.js"))
            .unwrap();

        let externals = Extractor::new().external_modules(&graph).unwrap();
        assert_eq!(externals.len(), 1);
        assert!(externals.contains(&ExternalRecord::new(Some("handler"), "lodash")));
    }

    #[test]
    fn builtins_and_bundled_modules_are_skipped() {
        let mut graph = ModuleGraph::new();
        graph.add_module(Module::new(r#"external "fs""#)).unwrap();
        graph.add_module(Module::new("/app/util.js")).unwrap();
        graph.add_module(Module::new(r#"external "@aws-sdk/client-s3""#)).unwrap();

        let externals = Extractor::new().external_modules(&graph).unwrap();
        let names: Vec<_> = externals.iter().map(|r| r.external.as_str()).collect();
        assert_eq!(names, vec!["@aws-sdk/client-s3"]);
        assert_eq!(externals[0].origin, None);
    }

    #[test]
    fn cyclic_issuer_degrades_to_unknown_origin() {
        let mut graph = ModuleGraph::new();
        graph.add_module(Module::new("a").with_raw_request("./b")).unwrap();
        graph.add_module(Module::new("b").with_raw_request("./a")).unwrap();
        graph.add_module(Module::new(r#"external "pg""#)).unwrap();
        graph.set_issuer(&id("a"), &id("b")).unwrap();
        graph.set_issuer(&id("b"), &id("a")).unwrap();
        graph.set_issuer(&id(r#"external "pg""#), &id("a")).unwrap();

        let externals = Extractor::new().external_modules(&graph).unwrap();
        assert_eq!(
            externals.into_iter().collect::<Vec<_>>(),
            vec![ExternalRecord::new(None::<String>, "pg")]
        );
    }

    #[test]
    fn malformed_external_fails_extraction() {
        let mut graph = ModuleGraph::new();
        graph.add_module(Module::new("external pg")).unwrap();

        let err = Extractor::new().external_modules(&graph).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Graph(GraphError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn child_compilation_errors_fail_the_build() {
        use crate::stats::{Compilation, StatsDiagnostic, StatsSnapshot};
        use std::path::Path;

        let snapshot = StatsSnapshot {
            output_path: Some(".webpack/api".into()),
            children: vec![StatsSnapshot {
                name: Some("worker".into()),
                errors: vec![StatsDiagnostic::new("Can't resolve 'left-pad'")],
                ..Default::default()
            }],
            ..Default::default()
        };
        let compilation = Compilation::from_snapshot(snapshot, Path::new("dist")).unwrap();

        let result = Extractor::new().extract(&compilation).unwrap();
        assert!(!result.is_ok());
        assert_eq!(result.error, "Child worker:\n      Can't resolve 'left-pad'");
    }

    #[test]
    fn display_mentions_origin() {
        assert_eq!(
            ExternalRecord::new(Some("./src/db"), "pg").to_string(),
            "pg (from ./src/db)"
        );
        assert_eq!(ExternalRecord::new(None::<String>, "pg").to_string(), "pg");
    }
}
