//! Keel Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod serialization;
pub mod type_hints;

pub use adapters::SystemProcessEnvironment;
pub use persistence::{AzdEnvironmentRepository, FileTemplateRepository, TokioFileSystem};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
pub use type_hints::{FileTypeHintsRepository, scan_parameter_types};
