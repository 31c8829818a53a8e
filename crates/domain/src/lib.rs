//! Keel Domain - Core resolution types
//!
//! This crate defines the domain model for the Keel deployment-parameter resolver.
//! All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod settings;
pub mod template;

pub use environment::{
    Environment, EnvironmentSource, ResolutionContext, ResolvedVariable, VariableMap,
    VariableScope,
};
pub use error::{DomainError, DomainResult};
pub use settings::WorkspaceConfig;
pub use template::{
    ParameterEntry, ParameterTemplate, ParameterType, ParameterTypes, ResolvedParameterSet,
    SECRET_MARKER, SecretHandling,
};
