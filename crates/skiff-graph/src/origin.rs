//! Origin tracing for external dependencies.
//!
//! A package is often reached through a chain of local re-exports:
//! `handler.js` imports `./lib`, which imports `./db`, which imports `pg`.
//! The origin of `pg` is the first issuer in that chain that was *not*
//! imported relatively, i.e. the first-party module a user actually wrote
//! the dependency for.

use crate::{Error, Module, ModuleGraph, Result};

/// Walk back from `issuer` through relatively imported (`./`) modules.
///
/// Returns the first module whose raw request does not start with `./`, or
/// `None` when the chain ends without one (the dependency is a direct import
/// of a top-level entry).
///
/// The walk is bounded by the module count of `graph`: an acyclic chain
/// cannot take more steps than there are modules, so exceeding the bound
/// fails with [`Error::CyclicIssuer`].
pub fn trace_origin<'g>(
    graph: &'g ModuleGraph,
    issuer: Option<&'g Module>,
) -> Result<Option<&'g Module>> {
    let bound = graph.len();
    let mut steps = 0;
    let mut current = issuer;

    while let Some(module) = current {
        if !module.is_relative_request() {
            return Ok(Some(module));
        }
        if steps >= bound {
            return Err(Error::CyclicIssuer {
                module: module.id().clone(),
                steps,
            });
        }
        steps += 1;
        current = graph.issuer_of(module);
    }

    Ok(None)
}
