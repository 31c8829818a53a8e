//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod environment_repository;
mod file_system;
mod process_environment;
mod template_repository;
mod type_hints_repository;

pub use environment_repository::{EnvironmentError, EnvironmentRepository};
pub use file_system::{FileSystem, FileSystemError, into_io_error};
pub use process_environment::ProcessEnvironment;
pub use template_repository::{TemplateError, TemplateRepository};
pub use type_hints_repository::{TypeHintsError, TypeHintsRepository};
