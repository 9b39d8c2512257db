//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod metadata;
pub mod mkdocs;
pub mod renderer;
pub mod services;
pub mod templates;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::{error_chain, IoResultExt};
pub use metadata::ProjectMetadata;
pub use renderer::DocTreeRenderer;
pub use templates::TemplateEngine;
