//! Project metadata exposed to templates
//!
//! The metadata file is read as an opaque TOML table. Every top-level key
//! becomes a template binding; the only interpretation applied is finding
//! a project name and, for Cargo manifests, aliasing `[package]` as
//! `project` so templates can use one spelling.

use std::path::{Path, PathBuf};

use tera::Context;
use toml::{Table, Value};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Parsed project metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectMetadata {
    path: PathBuf,
    table: Table,
}

impl ProjectMetadata {
    /// Parse metadata content; `path` is used for error messages only.
    pub fn parse(content: &str, path: &Path) -> ApplicationResult<Self> {
        let table: Table = toml::from_str(content).map_err(|e| ApplicationError::Metadata {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    /// Read and parse the metadata file.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> ApplicationResult<Self> {
        let content = fs
            .read_to_string(path)
            .with_path_context("read project metadata", path)?;
        Self::parse(&content, path)
    }

    /// The `[project]` table, or `[package]` for Cargo manifests.
    pub fn project(&self) -> Option<&Table> {
        self.table
            .get("project")
            .or_else(|| self.table.get("package"))
            .and_then(Value::as_table)
    }

    /// Declared project name, if any.
    pub fn name(&self) -> Option<&str> {
        self.project()?.get("name")?.as_str()
    }

    /// First author's name (`authors = [{ name = "..." }]` or `authors = ["Name <mail>"]`).
    pub fn first_author(&self) -> Option<String> {
        let author = self.project()?.get("authors")?.as_array()?.first()?;
        match author {
            Value::Table(t) => t.get("name")?.as_str().map(str::to_string),
            Value::String(s) => {
                let name = s.split('<').next().unwrap_or(s).trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            _ => None,
        }
    }

    /// Template bindings: all top-level keys, plus `project` aliased to `package`.
    pub fn to_context(&self) -> ApplicationResult<Context> {
        let mut context =
            Context::from_serialize(&self.table).map_err(|e| ApplicationError::Metadata {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        if !self.table.contains_key("project") {
            if let Some(package) = self.table.get("package") {
                context.insert("project", package);
            }
        }
        Ok(context)
    }
}
