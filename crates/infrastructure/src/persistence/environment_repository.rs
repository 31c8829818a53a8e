//! azd-style environment repository.
//!
//! Environments live in dotenv files under the workspace's `.azure/` directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use keel_application::ports::{
    EnvironmentError, EnvironmentRepository, FileSystem, FileSystemError, into_io_error,
};
use keel_domain::environment::validate_environment_name;
use keel_domain::{Environment, WorkspaceConfig};
use tracing::debug;

use crate::serialization::from_json_bytes;

const AZURE_DIR: &str = ".azure";
const CONFIG_FILE: &str = "config.json";
const ENV_FILE: &str = ".env";

/// File-based environment repository.
///
/// Reads environments laid out as:
/// ```text
/// workspace/
///   .azure/
///     config.json        { "version": 1, "defaultEnvironment": "dev" }
///     dev/.env
///     prod/.env
/// ```
#[derive(Debug, Clone)]
pub struct AzdEnvironmentRepository<F> {
    fs: F,
}

impl<F: FileSystem> AzdEnvironmentRepository<F> {
    /// Creates a new azd environment repository.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }

    fn azure_dir(workspace: &Path) -> PathBuf {
        workspace.join(AZURE_DIR)
    }

    fn config_path(workspace: &Path) -> PathBuf {
        Self::azure_dir(workspace).join(CONFIG_FILE)
    }

    fn env_file_path(workspace: &Path, name: &str) -> PathBuf {
        Self::azure_dir(workspace).join(name).join(ENV_FILE)
    }
}

/// Parses dotenv content without touching the process environment.
fn parse_dotenv(name: &str, content: &[u8]) -> Result<Environment, EnvironmentError> {
    let mut environment = Environment::new(name);
    for item in dotenvy::from_read_iter(content) {
        let (key, value) = item.map_err(|e| EnvironmentError::Parse(format!("{name}: {e}")))?;
        environment.set_variable(key, value);
    }
    Ok(environment)
}

#[async_trait]
impl<F: FileSystem> EnvironmentRepository for AzdEnvironmentRepository<F> {
    async fn load(&self, workspace: &Path, name: &str) -> Result<Environment, EnvironmentError> {
        validate_environment_name(name).map_err(|e| EnvironmentError::Invalid(e.to_string()))?;
        let path = Self::env_file_path(workspace, name);

        let content = match self.fs.read_file(&path).await {
            Ok(content) => content,
            Err(FileSystemError::NotFound(_)) => {
                return Err(EnvironmentError::NotFound(name.to_string()));
            }
            Err(e) => return Err(EnvironmentError::Io(into_io_error(e))),
        };

        let environment = parse_dotenv(name, &content)?;
        debug!(
            environment = name,
            variables = environment.variable_count(),
            "read environment file"
        );
        Ok(environment)
    }

    async fn list(&self, workspace: &Path) -> Result<Vec<String>, EnvironmentError> {
        let azure_dir = Self::azure_dir(workspace);

        if !self.fs.is_dir(&azure_dir).await {
            return Ok(Vec::new());
        }

        let entries = self
            .fs
            .read_dir(&azure_dir)
            .await
            .map_err(|e| EnvironmentError::Io(into_io_error(e)))?;

        let mut names = Vec::new();
        for entry in entries {
            let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if validate_environment_name(name).is_ok()
                && self.fs.exists(&entry.join(ENV_FILE)).await
            {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn load_config(&self, workspace: &Path) -> Result<WorkspaceConfig, EnvironmentError> {
        let path = Self::config_path(workspace);

        match self.fs.read_file(&path).await {
            Ok(content) => {
                from_json_bytes(&content).map_err(|e| EnvironmentError::Parse(e.to_string()))
            }
            Err(FileSystemError::NotFound(_)) => Ok(WorkspaceConfig::default()),
            Err(e) => Err(EnvironmentError::Io(into_io_error(e))),
        }
    }
}
