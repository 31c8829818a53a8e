//! Domain error types

use thiserror::Error;

use crate::template::ParameterType;

/// Domain-level errors that can occur during validation or resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A placeholder has no environment value and no inline default.
    #[error("missing required parameter `{name}` (at {path})")]
    MissingRequiredParameter {
        /// The referenced variable name.
        name: String,
        /// JSON pointer of the leaf containing the placeholder.
        path: String,
    },

    /// A token starts with `${` but does not match the placeholder grammar.
    #[error("malformed placeholder `{token}` (at {path})")]
    MalformedPlaceholder {
        /// The raw token as it appears in the template.
        token: String,
        /// JSON pointer of the leaf containing the token.
        path: String,
    },

    /// A substituted value cannot be coerced to the parameter's declared type.
    #[error("parameter `{parameter}` expects {expected}, got `{value}`")]
    TypeMismatch {
        /// The parameter name.
        parameter: String,
        /// The declared type.
        expected: ParameterType,
        /// The offending value. Empty for secure parameters.
        value: String,
    },

    /// A declared parameter type is not one ARM knows.
    #[error("invalid parameter type: {0}")]
    InvalidParameterType(String),

    /// An environment name is empty or contains unsupported characters.
    #[error("invalid environment name: {0}")]
    InvalidEnvironmentName(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
