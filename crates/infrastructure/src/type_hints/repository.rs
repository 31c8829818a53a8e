//! File-based type hints repository.

use std::path::Path;

use async_trait::async_trait;
use keel_application::ports::{
    FileSystem, FileSystemError, TypeHintsError, TypeHintsRepository, into_io_error,
};
use keel_domain::{ParameterType, ParameterTypes};
use serde_json::Value;
use tracing::{debug, warn};

use super::bicep::scan_parameter_types;
use crate::serialization::from_json_bytes;

/// Loads declared parameter types from disk.
///
/// Accepted formats, chosen by extension:
/// - `.bicep`: `param` declarations, see [`scan_parameter_types`]
/// - `.json`: either a flat `{ "name": "type" }` map, or a compiled ARM
///   template whose `parameters` entries carry a `type`
#[derive(Debug, Clone)]
pub struct FileTypeHintsRepository<F> {
    fs: F,
}

impl<F: FileSystem> FileTypeHintsRepository<F> {
    /// Creates a new type hints repository.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }
}

fn parse_json_types(content: &[u8]) -> Result<ParameterTypes, TypeHintsError> {
    let document: Value =
        from_json_bytes(content).map_err(|e| TypeHintsError::Parse(e.to_string()))?;

    match document.get("parameters") {
        Some(Value::Object(parameters)) => {
            let mut types = ParameterTypes::new();
            for (name, definition) in parameters {
                let Some(declared) = definition.get("type").and_then(Value::as_str) else {
                    continue;
                };
                match declared.parse::<ParameterType>() {
                    Ok(ty) => types.insert(name.as_str(), ty),
                    Err(_) => warn!(
                        parameter = name.as_str(),
                        declared, "skipping parameter with unsupported type"
                    ),
                }
            }
            Ok(types)
        }
        _ => serde_json::from_value(document).map_err(|e| TypeHintsError::Parse(e.to_string())),
    }
}

#[async_trait]
impl<F: FileSystem> TypeHintsRepository for FileTypeHintsRepository<F> {
    async fn load(&self, path: &Path) -> Result<ParameterTypes, TypeHintsError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if !matches!(extension.as_deref(), Some("json" | "bicep")) {
            return Err(TypeHintsError::UnsupportedFormat(path.to_path_buf()));
        }

        let content = match self.fs.read_file(path).await {
            Ok(content) => content,
            Err(FileSystemError::NotFound(_)) => {
                return Err(TypeHintsError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(TypeHintsError::Io(into_io_error(e))),
        };

        let types = if extension.as_deref() == Some("bicep") {
            let source = String::from_utf8(content)
                .map_err(|e| TypeHintsError::Parse(format!("{}: {e}", path.display())))?;
            scan_parameter_types(&source)
        } else {
            parse_json_types(&content)?
        };

        debug!(path = %path.display(), types = types.len(), "loaded type hints");
        Ok(types)
    }
}
