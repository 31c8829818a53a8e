//! Parameter resolution module
//!
//! Provides parsing and resolution of `${NAME}` / `${NAME=DEFAULT}` syntax in
//! ARM deployment-parameters documents.
//!
//! # Usage
//!
//! ```
//! use keel_application::parameter_resolver::ParameterResolver;
//! use keel_domain::{Environment, ResolutionContext};
//!
//! let env = Environment::with_variables("dev", [("AZURE_LOCATION", "eastus")]);
//! let resolver = ParameterResolver::new(ResolutionContext::from_environment(&env));
//!
//! let result = resolver.resolve_str("${AZURE_LOCATION}-${SUFFIX=rg}").unwrap();
//! assert_eq!(result.value, "eastus-rg");
//! ```

pub mod coercion;
pub mod engine;
pub mod parser;
pub mod report;

pub use coercion::coerce;
pub use engine::{ParameterResolver, ResolveOptions, ResolvedString, resolve, resolve_value};
pub use parser::{
    MalformedToken, Placeholder, has_placeholders, is_valid_name, parse_placeholders,
    referenced_names, scan_placeholders,
};
pub use report::{MalformedReference, MissingReference, ResolutionReport};
