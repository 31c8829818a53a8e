//! Parameter template domain types
//!
//! The unresolved ARM parameters document, declared parameter types, and the
//! resolved output.

mod document;
pub mod pointer;
mod resolved;
mod types;

pub use document::{DEPLOYMENT_PARAMETERS_SCHEMA, ParameterEntry, ParameterTemplate};
pub use resolved::{ResolvedParameterSet, SECRET_MARKER, SecretHandling, mask_path};
pub use types::{ParameterType, ParameterTypes};
