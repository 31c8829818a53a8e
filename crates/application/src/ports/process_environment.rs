//! Process environment port

use keel_domain::VariableMap;

/// Port for reading the variables of the running process.
///
/// This abstraction allows tests to supply a fixed environment.
pub trait ProcessEnvironment: Send + Sync {
    /// Returns a snapshot of the process environment.
    fn snapshot(&self) -> VariableMap;
}
