//! External module classification.
//!
//! An external module is one the bundler left out of the output; the engine
//! identifies it as `external "<path>"`. The package that has to be installed
//! at deploy time is derived from `<path>`:
//!
//! | identifier                         | package      |
//! |------------------------------------|--------------|
//! | `external "lodash"`                | `lodash`     |
//! | `external "lodash/merge"`          | `lodash`     |
//! | `external "@scope/pkg/sub/file"`   | `@scope/pkg` |
//! | `external node-commonjs "sharp"`   | `sharp`      |

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{BuiltinRegistry, Error, Module, NodeBuiltins, Result};

/// Identifier prefix shared by every externalized module.
pub const EXTERNAL_PREFIX: &str = "external ";

static EXTERNAL_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^external .*"(.*?)"$"#).expect("external identifier pattern"));

/// Extract the canonical package name from an external module's identifier.
///
/// Fails with [`Error::MalformedIdentifier`] when the identifier does not
/// match `external "<path>"`, when the path is empty, or when a scoped path
/// has no package segment (`external "@scope"`).
pub fn extract_package_name(module: &Module) -> Result<String> {
    let identifier = module.identifier();
    let malformed = || Error::MalformedIdentifier(identifier.to_string());

    let path = EXTERNAL_IDENTIFIER
        .captures(identifier)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .ok_or_else(malformed)?;

    let mut segments = path.split('/');
    let main = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;

    // Scoped package: the name spans the scope and the next segment
    if main.starts_with('@') {
        let name = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        return Ok(format!("{main}/{name}"));
    }

    Ok(main.to_string())
}

/// Decides which modules of a graph are externals that must be installed.
#[derive(Debug, Clone, Default)]
pub struct ModuleClassifier<R = NodeBuiltins> {
    builtins: R,
}

impl ModuleClassifier<NodeBuiltins> {
    /// Classifier that treats Node.js built-ins as runtime-provided.
    pub fn new() -> Self {
        Self {
            builtins: NodeBuiltins,
        }
    }
}

impl<R: BuiltinRegistry> ModuleClassifier<R> {
    pub fn with_builtins(builtins: R) -> Self {
        Self { builtins }
    }

    /// True iff the module is externalized and not a runtime built-in.
    ///
    /// Modules without the `external ` prefix are never parsed, so only
    /// externals can fail classification.
    pub fn is_external(&self, module: &Module) -> Result<bool> {
        Ok(self.classify(module)?.is_some())
    }

    /// The package name of an external module, or `None` for bundled
    /// modules and built-ins.
    pub fn classify(&self, module: &Module) -> Result<Option<String>> {
        if !module.identifier().starts_with(EXTERNAL_PREFIX) {
            return Ok(None);
        }
        let name = extract_package_name(module)?;
        if self.builtins.is_builtin(&name) {
            return Ok(None);
        }
        Ok(Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn external(path: &str) -> Module {
        Module::new(format!("external \"{path}\""))
    }

    #[test]
    fn extracts_plain_package() {
        assert_eq!(extract_package_name(&external("lodash")).unwrap(), "lodash");
        assert_eq!(extract_package_name(&external("lodash/merge")).unwrap(), "lodash");
    }

    #[test]
    fn extracts_scoped_package() {
        assert_eq!(
            extract_package_name(&external("@scope/pkg/sub/file")).unwrap(),
            "@scope/pkg"
        );
        assert_eq!(
            extract_package_name(&external("@aws-sdk/client-s3")).unwrap(),
            "@aws-sdk/client-s3"
        );
    }

    #[test]
    fn accepts_typed_external_identifiers() {
        let module = Module::new(r#"external node-commonjs "sharp/lib/index""#);
        assert_eq!(extract_package_name(&module).unwrap(), "sharp");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for identifier in [
            "external lodash",
            r#"external "lodash"!"#,
            "./src/index.js",
            r#"external """#,
            r#"external "@scope""#,
        ] {
            let err = extract_package_name(&Module::new(identifier)).unwrap_err();
            assert_eq!(err, Error::MalformedIdentifier(identifier.to_string()));
        }
    }

    #[test]
    fn builtins_are_not_external() {
        let classifier = ModuleClassifier::new();
        assert!(!classifier.is_external(&external("fs")).unwrap());
        assert!(!classifier.is_external(&external("fs/promises")).unwrap());
        assert!(!classifier.is_external(&external("node:path")).unwrap());
        assert!(classifier.is_external(&external("pg")).unwrap());
    }

    #[test]
    fn bundled_modules_are_not_external() {
        let classifier = ModuleClassifier::new();
        let module = Module::new("./src/handler.js").with_raw_request("./handler");
        assert!(!classifier.is_external(&module).unwrap());
    }

    #[test]
    fn malformed_external_fails_classification() {
        let classifier = ModuleClassifier::new();
        assert!(matches!(
            classifier.is_external(&Module::new("external lodash")),
            Err(Error::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn custom_registry_controls_builtins() {
        let classifier = ModuleClassifier::with_builtins(|name: &str| name == "aws-sdk");
        assert!(!classifier.is_external(&external("aws-sdk/clients/s3")).unwrap());
        assert!(classifier.is_external(&external("fs")).unwrap());
    }
}
