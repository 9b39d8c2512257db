//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/docsmith/docsmith.toml`
//! 3. Local config: `<project_dir>/.docsmith.toml`
//! 4. Environment variables: `DOCSMITH_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, DEFAULT_MAX_DEPTH};

/// Unified configuration for docsmith.
///
/// Relative paths are resolved against the project directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Markdown pages directory (mkdocs `docs_dir`)
    pub docs_dir: PathBuf,
    /// Directory holding `mkdocs.yml`
    pub site_dir: PathBuf,
    /// API reference directory, relative to `docs_dir`
    pub api_dir: PathBuf,
    /// Export manifest
    pub manifest: PathBuf,
    /// Project metadata file exposed to templates
    pub metadata_file: PathBuf,
    /// Directory whose files override the built-in templates
    pub templates_dir: Option<PathBuf>,
    /// Organization used in license and repository links
    pub organization_name: Option<String>,
    /// Root module to document (default: manifest `root`, then project slug)
    pub package: Option<String>,
    /// Heading level of top-level API entries
    pub heading_level: usize,
    /// Maximum module nesting the export walker follows
    pub max_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs/docs"),
            site_dir: PathBuf::from("docs"),
            api_dir: PathBuf::from("api"),
            manifest: PathBuf::from("docs/api.toml"),
            metadata_file: PathBuf::from("pyproject.toml"),
            templates_dir: None,
            organization_name: None,
            package: None,
            heading_level: 3,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub docs_dir: Option<PathBuf>,
    pub site_dir: Option<PathBuf>,
    pub api_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub metadata_file: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub organization_name: Option<String>,
    pub package: Option<String>,
    pub heading_level: Option<usize>,
    pub max_depth: Option<usize>,
}

/// Resolved locations of everything docsmith reads and writes.
///
/// Built once from `Settings` and handed to services at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPaths {
    /// Project root
    pub root: PathBuf,
    /// Markdown pages directory
    pub docs: PathBuf,
    /// Directory holding `mkdocs.yml`
    pub site: PathBuf,
    /// API reference pages
    pub api: PathBuf,
    pub manifest: PathBuf,
    pub metadata: PathBuf,
    pub templates: Option<PathBuf>,
}

impl DocPaths {
    pub fn new(settings: &Settings, root: &Path) -> Self {
        let docs = root.join(&settings.docs_dir);
        Self {
            root: root.to_path_buf(),
            api: docs.join(&settings.api_dir),
            docs,
            site: root.join(&settings.site_dir),
            manifest: root.join(&settings.manifest),
            metadata: root.join(&settings.metadata_file),
            templates: settings.templates_dir.as_ref().map(|dir| root.join(dir)),
        }
    }

    /// Path of the generated mkdocs configuration.
    pub fn mkdocs_config(&self) -> PathBuf {
        self.site.join("mkdocs.yml")
    }
}

/// Get the XDG config directory for docsmith.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "docsmith").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("docsmith.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".docsmith.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expand = |p: &Path| PathBuf::from(expand_env_vars(p.to_string_lossy().as_ref()));

        self.docs_dir = expand(&self.docs_dir);
        self.site_dir = expand(&self.site_dir);
        self.api_dir = expand(&self.api_dir);
        self.manifest = expand(&self.manifest);
        self.metadata_file = expand(&self.metadata_file);
        self.templates_dir = self.templates_dir.as_deref().map(expand);
    }

    /// Overlay wins where it specifies a value, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            docs_dir: overlay
                .docs_dir
                .clone()
                .unwrap_or_else(|| self.docs_dir.clone()),
            site_dir: overlay
                .site_dir
                .clone()
                .unwrap_or_else(|| self.site_dir.clone()),
            api_dir: overlay
                .api_dir
                .clone()
                .unwrap_or_else(|| self.api_dir.clone()),
            manifest: overlay
                .manifest
                .clone()
                .unwrap_or_else(|| self.manifest.clone()),
            metadata_file: overlay
                .metadata_file
                .clone()
                .unwrap_or_else(|| self.metadata_file.clone()),
            templates_dir: overlay
                .templates_dir
                .clone()
                .or_else(|| self.templates_dir.clone()),
            organization_name: overlay
                .organization_name
                .clone()
                .or_else(|| self.organization_name.clone()),
            package: overlay.package.clone().or_else(|| self.package.clone()),
            heading_level: overlay.heading_level.unwrap_or(self.heading_level),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/docsmith/docsmith.toml`
    /// 3. Local config: `<project_dir>/.docsmith.toml`
    /// 4. Environment variables: `DOCSMITH_*` prefix
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply DOCSMITH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("DOCSMITH").prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("docs_dir") {
            settings.docs_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("site_dir") {
            settings.site_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("api_dir") {
            settings.api_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("manifest") {
            settings.manifest = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("metadata_file") {
            settings.metadata_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("templates_dir") {
            settings.templates_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("organization_name") {
            settings.organization_name = Some(val);
        }
        if let Ok(val) = config.get_string("package") {
            settings.package = Some(val);
        }
        if let Ok(val) = config.get_int("heading_level") {
            settings.heading_level = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("DOCSMITH_HEADING_LEVEL out of range: {val}"),
            })?;
        }
        if let Ok(val) = config.get_int("max_depth") {
            settings.max_depth = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("DOCSMITH_MAX_DEPTH out of range: {val}"),
            })?;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.heading_level == 0 {
            return Err(ApplicationError::Config {
                message: "heading_level must be at least 1".into(),
            });
        }
        if self.max_depth == 0 {
            return Err(ApplicationError::Config {
                message: "max_depth must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# docsmith configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/docsmith/docsmith.toml
#   Local:  <project>/.docsmith.toml
#   Env:    DOCSMITH_* environment variables
#
# Relative paths are resolved against the project directory.

# Markdown pages (mkdocs docs_dir)
# docs_dir = "docs/docs"

# Directory holding mkdocs.yml
# site_dir = "docs"

# API reference pages, relative to docs_dir
# api_dir = "api"

# Export manifest describing modules and their exports
# manifest = "docs/api.toml"

# Project metadata exposed to templates
# metadata_file = "pyproject.toml"

# Override built-in templates with files of the same name
# templates_dir = "docs/templates"

# organization_name = "my-org"

# Root module to document (default: manifest root, then project directory name)
# package = "my_package"

# heading_level = 3
# max_depth = 32
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
