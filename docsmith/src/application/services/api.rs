//! API reference service
//!
//! Builds the export tree from the manifest and keeps the API reference
//! directory in sync with it: one page per top-level export, nothing else.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::renderer::DocTreeRenderer;
use crate::application::services::Outcome;
use crate::application::templates::TemplateEngine;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::{DocPaths, Settings};
use crate::domain::{to_snake_case, ApiManifest, DocNode, ExportWalker};
use crate::infrastructure::traits::FileSystem;

/// The documentation tree of one root module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTree {
    /// Qualified name of the documented module
    pub root: String,
    /// One node per export of the root module
    pub nodes: Vec<DocNode>,
}

/// Service generating the API reference pages.
pub struct ApiReferenceService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    paths: Arc<DocPaths>,
    templates: Arc<TemplateEngine>,
}

impl ApiReferenceService {
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

    /// Read and parse the export manifest.
    pub fn load_manifest(&self) -> ApplicationResult<ApiManifest> {
        let path = &self.paths.manifest;
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read manifest", path)?;
        Ok(ApiManifest::parse(&content)?)
    }

    /// Module to document: configured package, manifest root, or the
    /// snake_case name of the project directory.
    pub fn root_module(&self, manifest: &ApiManifest) -> ApplicationResult<String> {
        if let Some(package) = self.settings.package.as_ref().or(manifest.root.as_ref()) {
            return Ok(package.clone());
        }
        let root = self
            .fs
            .canonicalize(&self.paths.root)
            .with_path_context("resolve project root", &self.paths.root)?;
        let dir_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(to_snake_case(&dir_name))
    }

    /// Build the documentation tree without touching the output directory.
    pub fn build_tree(&self) -> ApplicationResult<ApiTree> {
        let manifest = self.load_manifest()?;
        let root = self.root_module(&manifest)?;
        info!("Getting exports from {} module", root);

        let nodes = ExportWalker::new(&manifest, &self.paths.api)
            .with_max_depth(self.settings.max_depth)
            .build_tree(&root, self.settings.heading_level)?;
        debug!("build_tree: {} top-level nodes", nodes.len());

        Ok(ApiTree { root, nodes })
    }

    /// Delete every file directly inside the API directory, creating it if needed.
    pub fn clear(&self) -> ApplicationResult<Vec<Outcome>> {
        let api = &self.paths.api;
        self.fs
            .create_dir_all(api)
            .with_path_context("create API directory", api)?;

        info!("Clearing API reference folder {}", api.display());
        let mut outcomes = Vec::new();
        for file in self
            .fs
            .list_files(api)
            .with_path_context("list API directory", api)?
        {
            self.fs
                .remove_file(&file)
                .with_path_context("remove stale page", &file)?;
            outcomes.push(Outcome::Removed(file));
        }
        Ok(outcomes)
    }

    /// Regenerate the API reference.
    ///
    /// The directory is cleared first so pages of renamed or removed
    /// exports do not survive; then each top-level node is rendered once and
    /// written to its output path, overwriting.
    pub fn sync(&self) -> ApplicationResult<Vec<Outcome>> {
        let mut outcomes = self.clear()?;
        let tree = self.build_tree()?;
        info!("Generating docs for {}", tree.root);

        let renderer = DocTreeRenderer::new(&self.templates);
        for node in &tree.nodes {
            let content = renderer.render(node)?;
            self.fs
                .write(&node.output_path, &content)
                .with_path_context("write API page", &node.output_path)?;
            outcomes.push(Outcome::Written(node.output_path.clone()));
        }

        info!("Generated docs for {}", tree.root);
        Ok(outcomes)
    }
}
