//! Environment and variable domain types

mod resolution;
mod variable;

pub use resolution::{EnvironmentSource, ResolutionContext};
pub use variable::{
    Environment, ResolvedVariable, VariableMap, VariableScope, validate_environment_name,
};
