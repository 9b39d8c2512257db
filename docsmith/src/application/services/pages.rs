//! Page service: renders project-level documents from metadata.

use std::path::Path;
use std::sync::Arc;

use tera::Context;
use tracing::{debug, info};

use crate::application::metadata::ProjectMetadata;
use crate::application::services::Outcome;
use crate::application::templates::TemplateEngine;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::{DocPaths, Settings};
use crate::domain::to_snake_case;
use crate::infrastructure::traits::FileSystem;
use crate::util::path::relative_link;

/// Renders a template against project metadata and writes the result.
pub struct PageService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    paths: Arc<DocPaths>,
    templates: Arc<TemplateEngine>,
}

impl PageService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        settings: Arc<Settings>,
        paths: Arc<DocPaths>,
        templates: Arc<TemplateEngine>,
    ) -> Self {
        Self {
            fs,
            settings,
            paths,
            templates,
        }
    }

    /// Template bindings for project pages.
    ///
    /// Every top-level metadata key, plus:
    /// - `project_name`: explicit name, else metadata name, else project directory name
    /// - `project_slug`: snake_case of `project_name`
    /// - `organization_name`: configured, else first metadata author, else empty
    /// - `docs_dir`: pages directory relative to the mkdocs config directory
    pub fn bindings(&self, project_name: Option<&str>) -> ApplicationResult<Context> {
        let metadata = ProjectMetadata::load(self.fs.as_ref(), &self.paths.metadata)?;
        let mut context = metadata.to_context()?;

        let name = match project_name.or(metadata.name()) {
            Some(name) => name.to_string(),
            None => self.directory_name()?,
        };
        let organization = self
            .settings
            .organization_name
            .clone()
            .or_else(|| metadata.first_author())
            .unwrap_or_default();

        context.insert("project_slug", &to_snake_case(&name));
        context.insert("project_name", &name);
        context.insert("organization_name", &organization);
        context.insert("docs_dir", &relative_link(&self.paths.site, &self.paths.docs));
        Ok(context)
    }

    /// Render `template` into `dir`, named `file_name` or after the template.
    ///
    /// `extra` bindings are layered over the metadata bindings. The target
    /// directory is created first; an existing file is overwritten.
    pub fn render(
        &self,
        template: &str,
        dir: &Path,
        file_name: Option<&str>,
        project_name: Option<&str>,
        extra: Context,
    ) -> ApplicationResult<Outcome> {
        info!("Generating {}", template);
        let mut context = self.bindings(project_name)?;
        context.extend(extra);

        debug!("render: rendering the template with the data");
        let content = self.templates.render(template, &context)?;

        let target = dir.join(file_name.unwrap_or(template));
        self.fs
            .ensure_parent(&target)
            .with_path_context("create directory", dir)?;
        self.fs
            .write(&target, &content)
            .with_path_context("write page", &target)?;

        info!("Generated {}", target.display());
        Ok(Outcome::Written(target))
    }

    fn directory_name(&self) -> ApplicationResult<String> {
        let root = self
            .fs
            .canonicalize(&self.paths.root)
            .with_path_context("resolve project root", &self.paths.root)?;
        Ok(root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default())
    }
}
