//! Template engine: named templates rendered against variable bindings
//!
//! Built-in templates are compiled into the binary. A project can override
//! any of them by placing a file with the same name in its templates
//! directory.

use std::path::Path;

use tera::{Context, Tera};
use tracing::debug;
use walkdir::WalkDir;

use crate::application::error_ext::error_chain;
use crate::application::{ApplicationError, ApplicationResult};

pub const DOCSTRING: &str = "docstring.md";
pub const INDEX: &str = "index.md";
pub const INSTALLATION: &str = "installation.md";
pub const LICENSE: &str = "license.md";
pub const LOGO: &str = "logo.svg";
pub const MKDOCS: &str = "mkdocs.yml";
pub const REQUIREMENTS: &str = "requirements.md";
pub const USAGE: &str = "usage.md";

const BUILTIN: &[(&str, &str)] = &[
    (DOCSTRING, include_str!("../../templates/docstring.md")),
    (INDEX, include_str!("../../templates/index.md")),
    (INSTALLATION, include_str!("../../templates/installation.md")),
    (LICENSE, include_str!("../../templates/license.md")),
    (LOGO, include_str!("../../templates/logo.svg")),
    (MKDOCS, include_str!("../../templates/mkdocs.yml")),
    (REQUIREMENTS, include_str!("../../templates/requirements.md")),
    (USAGE, include_str!("../../templates/usage.md")),
];

/// Renders templates by name.
pub struct TemplateEngine {
    tera: Tera,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.names())
            .finish()
    }
}

impl TemplateEngine {
    /// Engine with the built-in templates only.
    pub fn builtin() -> ApplicationResult<Self> {
        let mut tera = Tera::default();
        // Output is Markdown, YAML and SVG; never HTML-escape bindings.
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(BUILTIN.iter().copied())
            .map_err(|e| template_err("builtin", &e))?;
        Ok(Self { tera })
    }

    /// Engine with built-ins, overridden by files found directly in `dir`.
    ///
    /// A missing directory is not an error.
    pub fn with_overrides(dir: Option<&Path>) -> ApplicationResult<Self> {
        let mut engine = Self::builtin()?;
        let Some(dir) = dir else {
            return Ok(engine);
        };
        if !dir.is_dir() {
            debug!("with_overrides: no template dir at {}", dir.display());
            return Ok(engine);
        }

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            debug!("with_overrides: {} from {}", name, entry.path().display());
            engine
                .tera
                .add_template_file(entry.path(), Some(&name))
                .map_err(|e| template_err(&name, &e))?;
        }
        Ok(engine)
    }

    /// Render template `name` with `context`.
    pub fn render(&self, name: &str, context: &Context) -> ApplicationResult<String> {
        self.tera
            .render(name, context)
            .map_err(|e| template_err(name, &e))
    }

    /// Names of all loaded templates, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

fn template_err(name: &str, e: &tera::Error) -> ApplicationError {
    ApplicationError::Template {
        name: name.to_string(),
        message: error_chain(e),
    }
}
