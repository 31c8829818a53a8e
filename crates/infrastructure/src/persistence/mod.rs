//! File-based repository implementations.

mod environment_repository;
mod file_system;
mod template_repository;

pub use environment_repository::AzdEnvironmentRepository;
pub use file_system::TokioFileSystem;
pub use template_repository::FileTemplateRepository;
