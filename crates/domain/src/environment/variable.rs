//! Environment variable types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{DomainError, DomainResult};

/// A collection of variable values keyed by name.
pub type VariableMap = BTreeMap<String, String>;

/// Defines the origin of a variable for resolution precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableScope {
    /// Variables inherited from the process environment - lowest precedence
    Process = 0,
    /// Variables defined in the environment file (.azure/<env>/.env)
    Environment = 1,
    /// Values passed explicitly by the caller - highest precedence
    Override = 2,
}

impl VariableScope {
    /// Returns the precedence level (higher = takes priority).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        *self as u8
    }

    /// Returns a human-readable name for the scope.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Process => "Process",
            Self::Environment => "Environment",
            Self::Override => "Override",
        }
    }
}

/// A resolved variable with its value and origin scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariable {
    /// The variable name (without `${ }`).
    pub name: String,
    /// The resolved value.
    pub value: String,
    /// The scope from which this value was resolved.
    pub scope: VariableScope,
}

impl ResolvedVariable {
    /// Creates a new resolved variable.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, scope: VariableScope) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            scope,
        }
    }
}

/// A named deployment environment and its variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Environment {
    /// Environment name (e.g., "dev", "prod")
    pub name: String,
    /// Variables in this environment.
    pub variables: VariableMap,
}

impl Environment {
    /// Creates a new empty environment with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: VariableMap::new(),
        }
    }

    /// Creates an environment from name/value pairs.
    #[must_use]
    pub fn with_variables<I, K, V>(name: impl Into<String>, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            variables: variables
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Adds or updates a variable in this environment.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Gets a variable value by name.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Removes a variable by name.
    pub fn remove_variable(&mut self, name: &str) -> Option<String> {
        self.variables.remove(name)
    }

    /// Returns the number of variables in this environment.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

/// Validates an environment name.
///
/// Names are used as directory names under `.azure/`, so only letters, digits,
/// `-`, `_` and `.` are accepted, and `.`/`..` are rejected.
///
/// # Errors
///
/// Returns [`DomainError::InvalidEnvironmentName`] for empty or unsafe names.
pub fn validate_environment_name(name: &str) -> DomainResult<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidEnvironmentName(name.to_string()))
    }
}
