use std::fmt;

use serde::{Deserialize, Serialize};

/// Engine-assigned module identifier.
///
/// The identifier is opaque apart from one convention: externalized modules
/// are identified as `external "<path>"` (optionally with a type tag between
/// `external` and the quoted path, e.g. `external node-commonjs "fs"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ModuleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A node in a compilation's module graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: ModuleId,
    /// Import specifier as written in source, before resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_request: Option<String>,
}

impl Module {
    pub fn new(id: impl Into<ModuleId>) -> Self {
        Self {
            id: id.into(),
            raw_request: None,
        }
    }

    pub fn with_raw_request(mut self, raw_request: impl Into<String>) -> Self {
        self.raw_request = Some(raw_request.into());
        self
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn identifier(&self) -> &str {
        self.id.as_str()
    }

    pub fn raw_request(&self) -> Option<&str> {
        self.raw_request.as_deref()
    }

    /// True when the module was imported with a `./` specifier, i.e. it is a
    /// same-tree re-export rather than the origin of a dependency.
    pub fn is_relative_request(&self) -> bool {
        self.raw_request
            .as_deref()
            .is_some_and(|request| request.starts_with("./"))
    }
}
