//! Environment repository port
//!
//! Defines the interface for reading deployment environments.

use async_trait::async_trait;
use std::path::Path;

use keel_domain::{Environment, WorkspaceConfig};

/// Errors that can occur during environment operations.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// Environment not found.
    #[error("Environment not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The environment or config file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid environment name or data.
    #[error("Invalid environment: {0}")]
    Invalid(String),
}

/// Repository trait for environment lookup.
#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    /// Loads an environment by name from the workspace.
    ///
    /// # Arguments
    /// * `workspace` - Path to the workspace root
    /// * `name` - Environment name
    ///
    /// # Errors
    /// Returns `EnvironmentError::NotFound` if the environment doesn't exist.
    async fn load(&self, workspace: &Path, name: &str) -> Result<Environment, EnvironmentError>;

    /// Lists all available environment names in the workspace, sorted.
    async fn list(&self, workspace: &Path) -> Result<Vec<String>, EnvironmentError>;

    /// Loads the workspace configuration. A missing file yields the default.
    async fn load_config(&self, workspace: &Path) -> Result<WorkspaceConfig, EnvironmentError>;

    /// Returns the workspace's default environment name, if configured.
    async fn default_environment(
        &self,
        workspace: &Path,
    ) -> Result<Option<String>, EnvironmentError> {
        Ok(self.load_config(workspace).await?.default_environment)
    }

    /// Checks if an environment exists.
    ///
    /// # Arguments
    /// * `workspace` - Path to the workspace root
    /// * `name` - Environment name to check
    async fn exists(&self, workspace: &Path, name: &str) -> Result<bool, EnvironmentError> {
        match self.load(workspace, name).await {
            Ok(_) => Ok(true),
            Err(EnvironmentError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
