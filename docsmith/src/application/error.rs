//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("project name is required for {0}")]
    MissingProjectName(&'static str),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid metadata in {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    #[error("template {name}: {message}")]
    Template { name: String, message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
