//! Declared parameter types

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The type ARM declares for a template parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ParameterType {
    /// `string`
    String,
    /// `securestring`
    SecureString,
    /// `int`
    Int,
    /// `bool`
    Bool,
    /// `object`
    Object,
    /// `secureObject`
    SecureObject,
    /// `array`
    Array,
}

impl ParameterType {
    /// Returns the ARM spelling of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::SecureString => "securestring",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Object => "object",
            Self::SecureObject => "secureObject",
            Self::Array => "array",
        }
    }

    /// Returns true for `securestring` and `secureObject`.
    #[must_use]
    pub const fn is_secure(&self) -> bool {
        matches!(self, Self::SecureString | Self::SecureObject)
    }

    /// Returns the secure counterpart (`string` → `securestring`,
    /// `object` → `secureObject`); other types are unchanged.
    #[must_use]
    pub const fn to_secure(self) -> Self {
        match self {
            Self::String => Self::SecureString,
            Self::Object => Self::SecureObject,
            other => other,
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "securestring" => Ok(Self::SecureString),
            "int" => Ok(Self::Int),
            "bool" => Ok(Self::Bool),
            "object" => Ok(Self::Object),
            "secureobject" => Ok(Self::SecureObject),
            "array" => Ok(Self::Array),
            _ => Err(DomainError::InvalidParameterType(s.to_string())),
        }
    }
}

impl TryFrom<String> for ParameterType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParameterType> for String {
    fn from(value: ParameterType) -> Self {
        value.as_str().to_string()
    }
}

/// Declared types keyed by parameter name.
///
/// Lookups are case-insensitive, matching how ARM treats parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterTypes {
    types: IndexMap<String, ParameterType>,
}

impl ParameterTypes {
    /// Creates an empty type map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the type of a parameter, replacing any previous declaration.
    pub fn insert(&mut self, name: impl Into<String>, ty: ParameterType) {
        let name = name.into();
        if let Some(existing) = self.key_of(&name) {
            self.types.shift_remove(&existing);
        }
        self.types.insert(name, ty);
    }

    /// Returns the declared type of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ParameterType> {
        self.types.get(name).copied().or_else(|| {
            self.types
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, ty)| *ty)
        })
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ParameterType)> {
        self.types.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn key_of(&self, name: &str) -> Option<String> {
        self.types
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned()
    }
}

impl<K: Into<String>> FromIterator<(K, ParameterType)> for ParameterTypes {
    fn from_iter<I: IntoIterator<Item = (K, ParameterType)>>(iter: I) -> Self {
        let mut types = Self::new();
        for (name, ty) in iter {
            types.insert(name, ty);
        }
        types
    }
}
