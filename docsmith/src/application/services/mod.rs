//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner)
//! but are themselves concrete structs, not traits.

mod api;
mod generate;
mod pages;
mod site;

use std::fmt;
use std::path::PathBuf;

pub use api::{ApiReferenceService, ApiTree};
pub use generate::{DocKind, DocumentGenerator};
pub use pages::PageService;
pub use site::SiteService;

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    Removed(PathBuf),
    Skipped { path: PathBuf, reason: String },
}

impl Outcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            Outcome::Written(path) | Outcome::Removed(path) => path,
            Outcome::Skipped { path, .. } => path,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Written(path) => write!(f, "wrote {}", path.display()),
            Outcome::Removed(path) => write!(f, "removed {}", path.display()),
            Outcome::Skipped { path, reason } => {
                write!(f, "skipped {}: {}", path.display(), reason)
            }
        }
    }
}
