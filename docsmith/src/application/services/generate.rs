//! Document generator: dispatches every document kind.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use clap::ValueEnum;
use itertools::Itertools;
use tera::Context;
use tracing::{debug, info};

use crate::application::mkdocs::inject_api_reference;
use crate::application::services::{ApiReferenceService, Outcome, PageService};
use crate::application::templates::{
    INDEX, INSTALLATION, LICENSE, LOGO, MKDOCS, REQUIREMENTS, USAGE,
};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::DocPaths;
use crate::infrastructure::traits::FileSystem;
use crate::util::path::relative_link;

/// Documents docsmith can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DocKind {
    /// Everything below, in order
    Docs,
    /// API reference pages from the export manifest
    Docstring,
    IndexFile,
    Installation,
    /// license.md and the root LICENSE
    Licence,
    /// Project logo (needs a project name)
    Logo,
    /// mkdocs.yml with API Reference navigation
    Mkdocs,
    /// Logo and licence for a new project (needs a project name)
    Project,
    /// README.md from index, requirements, installation and usage
    Readme,
    Requirements,
    /// usage.md, kept if it already exists
    Usage,
}

impl DocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Docs => "docs",
            DocKind::Docstring => "docstring",
            DocKind::IndexFile => "index-file",
            DocKind::Installation => "installation",
            DocKind::Licence => "licence",
            DocKind::Logo => "logo",
            DocKind::Mkdocs => "mkdocs",
            DocKind::Project => "project",
            DocKind::Readme => "readme",
            DocKind::Requirements => "requirements",
            DocKind::Usage => "usage",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DOCS_SEQUENCE: [DocKind; 8] = [
    DocKind::Licence,
    DocKind::IndexFile,
    DocKind::Requirements,
    DocKind::Installation,
    DocKind::Usage,
    DocKind::Readme,
    DocKind::Docstring,
    DocKind::Mkdocs,
];

const README_SECTIONS: [DocKind; 4] = [
    DocKind::IndexFile,
    DocKind::Requirements,
    DocKind::Installation,
    DocKind::Usage,
];

/// Generates documents by kind, composing the composite kinds from the simple ones.
pub struct DocumentGenerator {
    fs: Arc<dyn FileSystem>,
    paths: Arc<DocPaths>,
    pages: PageService,
    api: ApiReferenceService,
}

impl DocumentGenerator {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        paths: Arc<DocPaths>,
        pages: PageService,
        api: ApiReferenceService,
    ) -> Self {
        Self {
            fs,
            paths,
            pages,
            api,
        }
    }

    /// Generate `kind`, returning what happened to each output file.
    ///
    /// Kinds that need a project name fail before any file is read or written.
    pub fn execute(
        &self,
        kind: DocKind,
        project_name: Option<&str>,
    ) -> ApplicationResult<Vec<Outcome>> {
        let mut outcomes = Vec::new();
        self.run(kind, project_name, &mut outcomes)?;
        Ok(outcomes)
    }

    fn run(
        &self,
        kind: DocKind,
        project_name: Option<&str>,
        out: &mut Vec<Outcome>,
    ) -> ApplicationResult<()> {
        debug!("run: kind={}, project_name={:?}", kind, project_name);
        let docs = &self.paths.docs;
        match kind {
            DocKind::Docs => {
                for step in DOCS_SEQUENCE {
                    self.run(step, project_name, out)?;
                }
            }
            DocKind::Docstring => out.extend(self.api.sync()?),
            DocKind::IndexFile => out.push(self.page(INDEX, docs, project_name)?),
            DocKind::Installation => out.push(self.page(INSTALLATION, docs, project_name)?),
            DocKind::Requirements => out.push(self.page(REQUIREMENTS, docs, project_name)?),
            DocKind::Licence => {
                let mut extra = Context::new();
                extra.insert("year", &Utc::now().year());
                out.push(
                    self.pages
                        .render(LICENSE, docs, None, project_name, extra.clone())?,
                );
                out.push(self.pages.render(
                    LICENSE,
                    &self.paths.root,
                    Some("LICENSE"),
                    project_name,
                    extra,
                )?);
            }
            DocKind::Logo => {
                let name = require_project_name(kind, project_name)?;
                out.push(self.pages.render(
                    LOGO,
                    &docs.join("images"),
                    Some(format!("{name}.svg").as_str()),
                    Some(name),
                    Context::new(),
                )?);
            }
            DocKind::Mkdocs => self.mkdocs(project_name, out)?,
            DocKind::Project => {
                let name = require_project_name(kind, project_name)?;
                info!("Generating project with name: {}", name);
                self.run(DocKind::Logo, Some(name), out)?;
                self.run(DocKind::Licence, Some(name), out)?;
            }
            DocKind::Readme => self.readme(project_name, out)?,
            DocKind::Usage => {
                let usage = docs.join(USAGE);
                if self.fs.exists(&usage) {
                    info!("{} already exists, skipping generation", usage.display());
                    out.push(Outcome::Skipped {
                        path: usage,
                        reason: "already exists".into(),
                    });
                } else {
                    out.push(self.page(USAGE, docs, project_name)?);
                }
            }
        }
        Ok(())
    }

    fn page(
        &self,
        template: &str,
        dir: &Path,
        project_name: Option<&str>,
    ) -> ApplicationResult<Outcome> {
        self.pages
            .render(template, dir, None, project_name, Context::new())
    }

    /// Render mkdocs.yml, then point its API Reference navigation at the
    /// freshly generated API pages.
    fn mkdocs(&self, project_name: Option<&str>, out: &mut Vec<Outcome>) -> ApplicationResult<()> {
        self.run(DocKind::Docstring, project_name, out)?;
        out.push(self.page(MKDOCS, &self.paths.site, project_name)?);

        info!("Generating API Reference");
        let config_path = self.paths.mkdocs_config();
        let content = self
            .fs
            .read_to_string(&config_path)
            .with_path_context("read mkdocs config", &config_path)?;
        let mut config: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| ApplicationError::OperationFailed {
                context: format!("parse {}", config_path.display()),
                source: Box::new(e),
            })?;

        let api = &self.paths.api;
        let pages: Vec<(String, String)> = self
            .fs
            .list_files(api)
            .with_path_context("list API directory", api)?
            .into_iter()
            .filter_map(|path| {
                let file_name = path.file_name()?.to_string_lossy().into_owned();
                Some((file_name, relative_link(&self.paths.docs, &path)))
            })
            .sorted()
            .collect();

        let rewritten = inject_api_reference(&mut config, &pages);
        debug!(
            "mkdocs: {} API pages in {} nav sections",
            pages.len(),
            rewritten
        );

        let rendered =
            serde_yaml::to_string(&config).map_err(|e| ApplicationError::OperationFailed {
                context: format!("serialize {}", config_path.display()),
                source: Box::new(e),
            })?;
        self.fs
            .write(&config_path, &rendered)
            .with_path_context("write mkdocs config", &config_path)?;
        info!("Generated API Reference");
        Ok(())
    }

    /// Regenerate the README sections and concatenate them into README.md.
    fn readme(&self, project_name: Option<&str>, out: &mut Vec<Outcome>) -> ApplicationResult<()> {
        for step in README_SECTIONS {
            self.run(step, project_name, out)?;
        }

        let readme_path = self.paths.root.join("README.md");
        info!("Writing {} with:", readme_path.display());
        let mut readme = String::new();
        for section in ["index", "requirements", "installation", "usage"] {
            let section_path = self.paths.docs.join(format!("{section}.md"));
            info!(" - {}", section);
            let content = self
                .fs
                .read_to_string(&section_path)
                .with_path_context("read README section", &section_path)?;
            readme.push_str(&content);
            readme.push('\n');
        }
        self.fs
            .write(&readme_path, &readme)
            .with_path_context("write README", &readme_path)?;
        out.push(Outcome::Written(readme_path));
        Ok(())
    }
}

fn require_project_name(kind: DocKind, project_name: Option<&str>) -> ApplicationResult<&str> {
    project_name
        .filter(|name| !name.trim().is_empty())
        .ok_or(ApplicationError::MissingProjectName(kind.as_str()))
}
