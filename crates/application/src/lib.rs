//! Keel Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - The parameter resolution engine
//! - Port traits (interfaces for external dependencies)
//! - Use case orchestration

pub mod error;
pub mod parameter_resolver;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use parameter_resolver::{ParameterResolver, ResolutionReport, ResolveOptions};
pub use use_cases::{
    CheckParameters, CheckParametersInput, CheckParametersOutput, ListEnvironments,
    ListEnvironmentsOutput, ResolveParameters, ResolveParametersInput, ResolveParametersOutput,
    SourceOptions, Sources,
};
