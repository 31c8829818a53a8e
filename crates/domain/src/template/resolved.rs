//! Resolved parameter set

use serde_json::Value;

use super::document::ParameterTemplate;
use super::pointer;
use crate::environment::ResolvedVariable;

/// Literal written in place of a masked secret value.
pub const SECRET_MARKER: &str = "*****";

/// What to do with values marked secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretHandling {
    /// Replace the resolved value with [`SECRET_MARKER`].
    #[default]
    Mask,
    /// Keep the resolved value (what a deployment needs).
    Reveal,
}

/// The fully substituted parameters document plus what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameterSet {
    document: ParameterTemplate,
    secret_paths: Vec<String>,
    variables: Vec<ResolvedVariable>,
    defaults_used: Vec<String>,
}

impl ResolvedParameterSet {
    /// Creates a resolved set.
    #[must_use]
    pub const fn new(
        document: ParameterTemplate,
        secret_paths: Vec<String>,
        variables: Vec<ResolvedVariable>,
        defaults_used: Vec<String>,
    ) -> Self {
        Self {
            document,
            secret_paths,
            variables,
            defaults_used,
        }
    }

    /// Returns the resolved document.
    #[must_use]
    pub const fn document(&self) -> &ParameterTemplate {
        &self.document
    }

    /// Returns the resolved `value` of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.document.parameter(name).and_then(|entry| entry.value())
    }

    /// JSON pointers of every value marked secret, in document order.
    #[must_use]
    pub fn secret_paths(&self) -> &[String] {
        &self.secret_paths
    }

    /// Returns true if the value at `path` is secret.
    #[must_use]
    pub fn is_secret(&self, path: &str) -> bool {
        self.secret_paths.iter().any(|p| p == path)
    }

    /// Variables substituted from the environment source, in document order.
    #[must_use]
    pub fn variables(&self) -> &[ResolvedVariable] {
        &self.variables
    }

    /// Names that fell back to their inline default, in document order.
    #[must_use]
    pub fn defaults_used(&self) -> &[String] {
        &self.defaults_used
    }

    /// Returns a copy of the document with every secret value masked.
    #[must_use]
    pub fn redacted(&self) -> ParameterTemplate {
        let mut document = self.document.clone();
        for path in &self.secret_paths {
            mask_path(&mut document, path);
        }
        document
    }
}

/// Replaces the value at `path` with [`SECRET_MARKER`]. The path points into
/// `/parameters/<name>/<field>/...` or into a top-level extra field. Returns
/// false if the path does not exist.
pub fn mask_path(document: &mut ParameterTemplate, path: &str) -> bool {
    let segments = pointer::split(path);
    let target = match segments.as_slice() {
        [root, name, field, rest @ ..] if root.as_str() == "parameters" => document
            .parameters
            .get_mut(name)
            .and_then(|entry| entry.field_mut(field))
            .and_then(|value| value.pointer_mut(&pointer::join(rest))),
        [root, rest @ ..] if root.as_str() != "parameters" => document
            .extra
            .get_mut(root)
            .and_then(|value| value.pointer_mut(&pointer::join(rest))),
        _ => None,
    };

    match target {
        Some(value) => {
            *value = Value::String(SECRET_MARKER.to_string());
            true
        }
        None => false,
    }
}
