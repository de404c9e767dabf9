//! # skiff-graph
//!
//! Module graph primitives for post-processing a completed bundler build.
//!
//! The bundler engine hands back a module graph per compilation: every module
//! has an engine-assigned identifier, an optional raw request (the import
//! specifier as written in source) and at most one issuer (its importer).
//! This crate answers two questions about that graph:
//!
//! - **Which modules are external?** See [`ModuleClassifier`]. Externals carry
//!   an identifier of the form `external "<path>"`; the canonical package name
//!   is derived from `<path>`, and runtime built-ins are never reported.
//! - **Who introduced an external?** See [`trace_origin`]. The tracer walks back
//!   through relatively imported (`./`) issuers until it reaches the first-party
//!   module that imported the dependency.
//!
//! ## Example
//!
//! ```rust
//! use skiff_graph::{Module, ModuleClassifier, ModuleGraph, ModuleId, trace_origin};
//!
//! # fn main() -> skiff_graph::Result<()> {
//! let mut graph = ModuleGraph::new();
//! graph.add_module(Module::new("./src/handler.js").with_raw_request("src/handler"))?;
//! graph.add_module(Module::new("./src/db.js").with_raw_request("./db"))?;
//! graph.add_module(Module::new(r#"external "pg/lib/client""#).with_raw_request("pg/lib/client"))?;
//! graph.set_issuer(&ModuleId::new("./src/db.js"), &ModuleId::new("./src/handler.js"))?;
//! graph.set_issuer(&ModuleId::new(r#"external "pg/lib/client""#), &ModuleId::new("./src/db.js"))?;
//!
//! let classifier = ModuleClassifier::new();
//! let pg = graph.module(&ModuleId::new(r#"external "pg/lib/client""#)).unwrap();
//! assert_eq!(classifier.classify(pg)?, Some("pg".to_string()));
//!
//! let origin = trace_origin(&graph, graph.issuer_of(pg))?;
//! assert_eq!(origin.and_then(|m| m.raw_request()), Some("src/handler"));
//! # Ok(())
//! # }
//! ```

pub mod builtins;
pub mod classify;
pub mod graph;
pub mod module;
pub mod origin;

pub use builtins::{BuiltinRegistry, NodeBuiltins};
pub use classify::{EXTERNAL_PREFIX, ModuleClassifier, extract_package_name};
pub use graph::ModuleGraph;
pub use module::{Module, ModuleId};
pub use origin::trace_origin;

/// Error types for graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An external module's identifier does not match `external "<path>"`.
    ///
    /// This is an engine-contract violation and is never swallowed.
    #[error("Unable to extract module name from identifier: {0}")]
    MalformedIdentifier(String),

    /// The issuer chain did not terminate within the graph's module count.
    #[error("Issuer chain starting at {module} did not terminate after {steps} steps")]
    CyclicIssuer { module: ModuleId, steps: usize },

    /// A module with the same identifier was already added.
    #[error("Duplicate module: {0}")]
    DuplicateModule(ModuleId),

    /// The referenced module is not part of the graph.
    #[error("Unknown module: {0}")]
    UnknownModule(ModuleId),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;
