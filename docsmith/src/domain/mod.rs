//! Domain layer: documentation tree entities and the export walker
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod manifest;
pub mod walker;

pub use entities::*;
pub use error::DomainError;
pub use manifest::{classify, ApiManifest, Member, ModuleDecl};
pub use walker::{ExportWalker, TreeResult, DEFAULT_MAX_DEPTH};
