//! Template repository port
//!
//! Defines the interface for reading and writing parameters documents.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use keel_domain::ParameterTemplate;

/// Errors that can occur during template operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template file not found.
    #[error("Template not found: {0}")]
    NotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for parameters documents.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Loads a parameters document.
    ///
    /// # Errors
    /// Returns `TemplateError::NotFound` if the file doesn't exist and
    /// `TemplateError::Serialization` if it is not a parameters document.
    async fn load(&self, path: &Path) -> Result<ParameterTemplate, TemplateError>;

    /// Saves a parameters document, replacing any existing file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    async fn save(&self, path: &Path, document: &ParameterTemplate) -> Result<(), TemplateError>;
}
