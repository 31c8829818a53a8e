//! Application error types

use thiserror::Error;
use keel_domain::DomainError;

use crate::ports::{EnvironmentError, FileSystemError, TemplateError, TypeHintsError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A resolution or validation error occurred.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The parameters document could not be loaded or saved.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// The environment could not be loaded.
    #[error("environment error: {0}")]
    Environment(#[from] EnvironmentError),

    /// The declared parameter types could not be loaded.
    #[error("type hints error: {0}")]
    TypeHints(#[from] TypeHintsError),

    /// A file system operation failed.
    #[error("file system error: {0}")]
    FileSystem(#[from] FileSystemError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
