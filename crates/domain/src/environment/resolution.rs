//! Resolution context for placeholder substitution
//!
//! Holds all variable sources for resolution with proper precedence.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use super::variable::{Environment, ResolvedVariable, VariableMap, VariableScope};

/// A read-only mapping from variable name to value.
///
/// A name that is present with an empty value counts as defined.
pub trait EnvironmentSource {
    /// Looks up a variable, returning its value and the scope it came from.
    fn lookup(&self, name: &str) -> Option<ResolvedVariable>;

    /// Returns true if the source defines `name`.
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

impl<T: EnvironmentSource + ?Sized> EnvironmentSource for &T {
    fn lookup(&self, name: &str) -> Option<ResolvedVariable> {
        (**self).lookup(name)
    }
}

impl<S: BuildHasher> EnvironmentSource for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<ResolvedVariable> {
        self.get(name)
            .map(|value| ResolvedVariable::new(name, value.clone(), VariableScope::Environment))
    }
}

impl EnvironmentSource for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<ResolvedVariable> {
        self.get(name)
            .map(|value| ResolvedVariable::new(name, value.clone(), VariableScope::Environment))
    }
}

impl EnvironmentSource for Environment {
    fn lookup(&self, name: &str) -> Option<ResolvedVariable> {
        self.variables.lookup(name)
    }
}

/// Holds all variable sources for resolution.
/// Variables are resolved in order of precedence (highest wins):
/// 1. Overrides (`--set KEY=VALUE`)
/// 2. Environment file (.azure/<env>/.env)
/// 3. Process environment
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    /// Process environment variables (lowest precedence).
    pub process: VariableMap,

    /// Active environment variables.
    pub environment: VariableMap,

    /// Active environment name (for display purposes).
    pub environment_name: String,

    /// Explicit overrides (highest precedence).
    pub overrides: VariableMap,
}

impl ResolutionContext {
    /// Creates a new empty resolution context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolution context with just an environment.
    #[must_use]
    pub fn from_environment(environment: &Environment) -> Self {
        Self::new().with_environment(environment)
    }

    /// Sets the process environment source.
    #[must_use]
    pub fn with_process<I, K, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.process = variables
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Sets the environment source.
    #[must_use]
    pub fn with_environment(mut self, environment: &Environment) -> Self {
        self.environment.clone_from(&environment.variables);
        self.environment_name.clone_from(&environment.name);
        self
    }

    /// Sets the overrides source.
    #[must_use]
    pub fn with_overrides<I, K, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides = variables
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }
}

impl EnvironmentSource for ResolutionContext {
    fn lookup(&self, name: &str) -> Option<ResolvedVariable> {
        if let Some(value) = self.overrides.get(name) {
            return Some(ResolvedVariable::new(name, value.clone(), VariableScope::Override));
        }

        if let Some(value) = self.environment.get(name) {
            return Some(ResolvedVariable::new(
                name,
                value.clone(),
                VariableScope::Environment,
            ));
        }

        self.process
            .get(name)
            .map(|value| ResolvedVariable::new(name, value.clone(), VariableScope::Process))
    }
}
