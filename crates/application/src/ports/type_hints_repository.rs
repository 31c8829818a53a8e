//! Type hints repository port
//!
//! Declared parameter types come from a JSON map or a Bicep template.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use keel_domain::ParameterTypes;

/// Errors that can occur while loading type hints.
#[derive(Debug, thiserror::Error)]
pub enum TypeHintsError {
    /// Type hints file not found.
    #[error("Type hints not found: {0}")]
    NotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The file extension is neither `.json` nor `.bicep`.
    #[error("Unsupported type hints format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Repository trait for declared parameter types.
#[async_trait]
pub trait TypeHintsRepository: Send + Sync {
    /// Loads declared types from a file.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or unparsable.
    async fn load(&self, path: &Path) -> Result<ParameterTypes, TypeHintsError>;
}
