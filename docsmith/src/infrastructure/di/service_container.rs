//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{
    ApiReferenceService, DocumentGenerator, PageService, SiteService,
};
use crate::application::{ApplicationResult, TemplateEngine};
use crate::config::{DocPaths, Settings};
use crate::infrastructure::traits::{CommandRunner, FileSystem, RealCommandRunner, RealFileSystem};

/// Container holding the shared dependencies of all services.
///
/// Services are cheap to build and are created on demand.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Project paths resolved against the project root
    pub paths: Arc<DocPaths>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Built-in templates plus project overrides
    pub templates: Arc<TemplateEngine>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, root: &Path) -> ApplicationResult<Self> {
        Self::with_deps(
            settings,
            root,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        root: &Path,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> ApplicationResult<Self> {
        let paths = DocPaths::new(&settings, root);
        debug!("with_deps: {:?}", paths);
        let templates = TemplateEngine::with_overrides(paths.templates.as_deref())?;

        Ok(Self {
            settings: Arc::new(settings),
            paths: Arc::new(paths),
            fs,
            cmd,
            templates: Arc::new(templates),
        })
    }

    pub fn pages(&self) -> PageService {
        PageService::new(
            self.fs.clone(),
            self.settings.clone(),
            self.paths.clone(),
            self.templates.clone(),
        )
    }

    pub fn api(&self) -> ApiReferenceService {
        ApiReferenceService::new(
            self.fs.clone(),
            self.settings.clone(),
            self.paths.clone(),
            self.templates.clone(),
        )
    }

    pub fn generator(&self) -> DocumentGenerator {
        DocumentGenerator::new(
            self.fs.clone(),
            self.paths.clone(),
            self.pages(),
            self.api(),
        )
    }

    pub fn site(&self) -> SiteService {
        SiteService::new(self.cmd.clone(), self.paths.clone())
    }
}
