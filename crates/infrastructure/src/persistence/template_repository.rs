//! File-based parameters document repository.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use keel_application::ports::{
    FileSystem, FileSystemError, TemplateError, TemplateRepository, into_io_error,
};
use keel_domain::ParameterTemplate;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Reads and writes `*.parameters.json` documents.
///
/// Saving writes a sibling temporary file and renames it over the target, so
/// a failed write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct FileTemplateRepository<F> {
    fs: F,
}

impl<F: FileSystem> FileTemplateRepository<F> {
    /// Creates a new file-based template repository.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }

    fn temporary_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map_or_else(|| OsString::from("parameters"), ToOwned::to_owned);
        name.push(".tmp");
        path.with_file_name(name)
    }
}

fn template_error(path: &Path, e: FileSystemError) -> TemplateError {
    match e {
        FileSystemError::NotFound(_) => TemplateError::NotFound(path.to_path_buf()),
        other => TemplateError::Io(into_io_error(other)),
    }
}

#[async_trait]
impl<F: FileSystem> TemplateRepository for FileTemplateRepository<F> {
    async fn load(&self, path: &Path) -> Result<ParameterTemplate, TemplateError> {
        let content = self
            .fs
            .read_file(path)
            .await
            .map_err(|e| template_error(path, e))?;

        let template: ParameterTemplate = from_json_bytes(&content)
            .map_err(|e| TemplateError::Serialization(format!("{}: {e}", path.display())))?;

        debug!(
            path = %path.display(),
            parameters = template.parameter_count(),
            "loaded template"
        );
        Ok(template)
    }

    async fn save(&self, path: &Path, document: &ParameterTemplate) -> Result<(), TemplateError> {
        let content = to_json_stable_bytes(document)
            .map_err(|e| TemplateError::Serialization(e.to_string()))?;

        let temporary = Self::temporary_path(path);
        self.fs
            .write_file(&temporary, &content)
            .await
            .map_err(|e| template_error(path, e))?;
        self.fs
            .rename(&temporary, path)
            .await
            .map_err(|e| template_error(path, e))?;

        debug!(path = %path.display(), "saved template");
        Ok(())
    }
}
