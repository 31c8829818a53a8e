//! Declared parameter types from JSON and Bicep files.

mod bicep;
mod repository;

pub use bicep::scan_parameter_types;
pub use repository::FileTypeHintsRepository;
