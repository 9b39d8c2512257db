//! API manifest: the declared export structure of a package
//!
//! The manifest is the static stand-in for live module introspection.
//! Modules are declared by qualified name; each carries an ordered export
//! list and a table binding every export name to a member entity.
//!
//! ```toml
//! root = "my_pkg"
//!
//! [modules.my_pkg]
//! doc = "Package docstring"
//! exports = ["foo", "sub"]
//!
//! [modules.my_pkg.members.foo]
//! kind = "function"
//! doc = "does foo"
//!
//! [modules.my_pkg.members.sub]
//! module = "my_pkg.sub"
//!
//! [modules."my_pkg.sub"]
//! exports = []
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::entities::ExportKind;
use crate::domain::error::DomainError;

/// Parsed API manifest.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiManifest {
    /// Qualified name of the module to document
    pub root: Option<String>,
    /// All declared modules, keyed by qualified name
    pub modules: BTreeMap<String, ModuleDecl>,
}

/// A module and its public surface.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModuleDecl {
    pub doc: Option<String>,
    /// Ordered export list
    pub exports: Vec<String>,
    /// Entity bound to each export name
    pub members: BTreeMap<String, Member>,
}

/// An entity bound to an export name.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Member {
    /// Declared kind: "module", "function", "class" or anything else
    pub kind: Option<String>,
    /// The entity's own name when exported under an alias
    pub name: Option<String>,
    pub doc: Option<String>,
    /// Qualified name of the referenced module
    pub module: Option<String>,
}

impl Member {
    /// Whether this member exposes a further export surface.
    pub fn is_container(&self) -> bool {
        self.module.is_some() || self.kind.as_deref() == Some("module")
    }

    /// Qualified name of the module this member refers to.
    ///
    /// Falls back to `<container>.<export>` when no explicit reference is given.
    pub fn module_target(&self, container: &str, export: &str) -> String {
        self.module
            .clone()
            .unwrap_or_else(|| format!("{container}.{export}"))
    }
}

/// Classify a member by what it can do rather than by its declared label.
pub fn classify(member: &Member) -> ExportKind {
    if member.is_container() {
        return ExportKind::Module;
    }
    match member.kind.as_deref() {
        Some("function") => ExportKind::Function,
        Some("class") => ExportKind::Class,
        _ => ExportKind::Unknown,
    }
}

impl ApiManifest {
    /// Parse manifest TOML.
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        toml::from_str(content).map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }

    /// Look up a declared module.
    pub fn module(&self, name: &str) -> Result<&ModuleDecl, DomainError> {
        self.modules
            .get(name)
            .ok_or_else(|| DomainError::UnknownModule(name.to_string()))
    }
}
