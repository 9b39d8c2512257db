//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the declared export structure.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("module '{container}' declares export '{name}' but binds no member to it")]
    UnresolvedExport { container: String, name: String },

    #[error("module not declared in manifest: {0}")]
    UnknownModule(String),

    #[error("cycle detected in export graph: {}", chain.join(" -> "))]
    CycleDetected { chain: Vec<String> },

    #[error("export graph deeper than {max_depth} modules at: {module}")]
    DepthExceeded { module: String, max_depth: usize },

    #[error("heading level must be at least 1, got {0}")]
    InvalidHeadingLevel(usize),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}
