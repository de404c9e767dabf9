//! In-memory module graph with an issuer relation.
//!
//! Modules are stored in insertion order so that enumerating a graph yields
//! the same order the engine reported them in.

use rustc_hash::FxHashMap;

use crate::{Error, Module, ModuleId, Result};

/// Module graph of a single completed compilation.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    modules: Vec<Module>,
    index: FxHashMap<ModuleId, usize>,
    /// module index -> issuer index
    issuers: FxHashMap<usize, usize>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module. Identifiers must be unique within a graph.
    pub fn add_module(&mut self, module: Module) -> Result<()> {
        if self.index.contains_key(module.id()) {
            return Err(Error::DuplicateModule(module.id().clone()));
        }
        self.index.insert(module.id().clone(), self.modules.len());
        self.modules.push(module);
        Ok(())
    }

    /// Record `issuer` as the module that imported `module`.
    ///
    /// A module has at most one issuer; setting it again replaces the
    /// previous value.
    pub fn set_issuer(&mut self, module: &ModuleId, issuer: &ModuleId) -> Result<()> {
        let module_idx = self.position(module)?;
        let issuer_idx = self.position(issuer)?;
        self.issuers.insert(module_idx, issuer_idx);
        Ok(())
    }

    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.index.get(id).map(|&idx| &self.modules[idx])
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.index.contains_key(id)
    }

    /// The module that imported `module`, or `None` for entry modules and
    /// modules that do not belong to this graph.
    pub fn issuer_of(&self, module: &Module) -> Option<&Module> {
        let idx = self.index.get(module.id())?;
        self.issuers.get(idx).map(|&issuer| &self.modules[issuer])
    }

    /// Iterate modules in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn position(&self, id: &ModuleId) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownModule(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ModuleId {
        ModuleId::new(s)
    }

    #[test]
    fn issuer_lookup_follows_recorded_edge() {
        let mut graph = ModuleGraph::new();
        graph.add_module(Module::new("entry")).unwrap();
        graph
            .add_module(Module::new("dep").with_raw_request("./dep"))
            .unwrap();
        graph.set_issuer(&id("dep"), &id("entry")).unwrap();

        let dep = graph.module(&id("dep")).unwrap();
        assert_eq!(graph.issuer_of(dep).map(Module::id), Some(&id("entry")));

        let entry = graph.module(&id("entry")).unwrap();
        assert!(graph.issuer_of(entry).is_none());
    }

    #[test]
    fn duplicate_module_is_rejected() {
        let mut graph = ModuleGraph::new();
        graph.add_module(Module::new("a")).unwrap();
        assert_eq!(
            graph.add_module(Module::new("a")),
            Err(Error::DuplicateModule(id("a")))
        );
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn issuer_edge_to_unknown_module_is_rejected() {
        let mut graph = ModuleGraph::new();
        graph.add_module(Module::new("a")).unwrap();
        assert_eq!(
            graph.set_issuer(&id("a"), &id("missing")),
            Err(Error::UnknownModule(id("missing")))
        );
    }

    #[test]
    fn modules_keep_insertion_order() {
        let mut graph = ModuleGraph::new();
        for name in ["c", "a", "b"] {
            graph.add_module(Module::new(name)).unwrap();
        }
        let order: Vec<_> = graph.modules().map(|m| m.identifier()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn foreign_module_has_no_issuer() {
        let graph = ModuleGraph::new();
        assert!(graph.issuer_of(&Module::new("elsewhere")).is_none());
    }
}
