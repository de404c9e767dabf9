use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Serialized stats of one compilation.
///
/// Field names follow webpack's `--json` output. Unknown fields are ignored,
/// so full webpack stats parse as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    #[serde(default)]
    pub modules: Vec<ModuleRecord>,
    #[serde(default)]
    pub errors: Vec<StatsDiagnostic>,
    #[serde(default)]
    pub warnings: Vec<StatsDiagnostic>,
    #[serde(default)]
    pub children: Vec<StatsSnapshot>,
}

impl StatsSnapshot {
    /// True for the stats of a multi-compiler run: only child compilations,
    /// no modules of its own.
    pub fn is_multi_compiler(&self) -> bool {
        self.modules.is_empty() && !self.children.is_empty()
    }
}

/// One module entry of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    pub identifier: String,
    #[serde(default)]
    pub raw_request: Option<String>,
    /// Identifier of the importing module.
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<ModuleReason>,
}

impl ModuleRecord {
    /// The request this module was imported with.
    ///
    /// Plain `webpack --json` output has no `rawRequest`; the request is then
    /// taken from the reason whose module is the issuer, or the first reason
    /// that carries one.
    pub fn request(&self) -> Option<&str> {
        if let Some(raw) = &self.raw_request {
            return Some(raw);
        }
        let from_issuer = self.issuer.as_deref().and_then(|issuer| {
            self.reasons
                .iter()
                .filter(|r| r.module_identifier.as_deref() == Some(issuer))
                .find_map(|r| r.user_request.as_deref())
        });
        from_issuer.or_else(|| self.reasons.iter().find_map(|r| r.user_request.as_deref()))
    }
}

/// Why a module was included: the importing module and the request it used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleReason {
    #[serde(default)]
    pub module_identifier: Option<String>,
    #[serde(default)]
    pub user_request: Option<String>,
}

/// A compiler error or warning.
///
/// Accepts both plain strings and `{ message, moduleName, loc }` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDiagnostic", rename_all = "camelCase")]
pub struct StatsDiagnostic {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
}

impl StatsDiagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            module_name: None,
            loc: None,
        }
    }

    pub fn in_module(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = Some(module_name.into());
        self
    }

    pub fn at(mut self, loc: impl Into<String>) -> Self {
        self.loc = Some(loc.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDiagnostic {
    Text(String),
    #[serde(rename_all = "camelCase")]
    Detailed {
        message: String,
        #[serde(default)]
        module_name: Option<String>,
        #[serde(default)]
        loc: Option<String>,
    },
}

impl From<RawDiagnostic> for StatsDiagnostic {
    fn from(raw: RawDiagnostic) -> Self {
        match raw {
            RawDiagnostic::Text(message) => Self::new(message),
            RawDiagnostic::Detailed {
                message,
                module_name,
                loc,
            } => Self {
                message,
                module_name,
                loc,
            },
        }
    }
}
