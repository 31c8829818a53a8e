//! ARM deployment-parameters document

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema URL written by `azd` and the Azure tooling for parameter files.
pub const DEPLOYMENT_PARAMETERS_SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2019-04-01/deploymentParameters.json#";

/// An ARM deployment-parameters document (`main.parameters.json`).
///
/// Field order is preserved: `$schema`, `contentVersion`, `parameters`, then
/// any other top-level fields in the order they were read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParameterTemplate {
    /// The `$schema` URL.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// The `contentVersion` string.
    #[serde(
        rename = "contentVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_version: Option<String>,

    /// Parameters keyed by name, in document order.
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterEntry>,

    /// Any other top-level fields.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ParameterTemplate {
    /// Creates an empty document with the standard schema and content version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: Some(DEPLOYMENT_PARAMETERS_SCHEMA.to_string()),
            content_version: Some("1.0.0.0".to_string()),
            parameters: IndexMap::new(),
            extra: IndexMap::new(),
        }
    }

    /// Adds a parameter with the given value specification.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), ParameterEntry::new(value));
        self
    }

    /// Gets a parameter entry by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterEntry> {
        self.parameters.get(name)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

/// A single parameter entry: `{ "value": ... }`, or a Key Vault `reference`,
/// plus any `metadata`. All fields are kept in their original order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterEntry {
    fields: Map<String, Value>,
}

impl ParameterEntry {
    /// Creates an entry holding `value`.
    #[must_use]
    pub fn new(value: Value) -> Self {
        let mut fields = Map::new();
        fields.insert("value".to_string(), value);
        Self { fields }
    }

    /// Creates an entry from raw fields.
    #[must_use]
    pub const fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the `value` field, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.fields.get("value")
    }

    /// Returns a mutable reference to any field.
    pub fn field_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Returns true if the entry is a Key Vault reference rather than a value.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.fields.contains_key("reference")
    }

    /// Returns all fields in order.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
