//! Adapters for system services.

mod process_environment;

pub use process_environment::SystemProcessEnvironment;
