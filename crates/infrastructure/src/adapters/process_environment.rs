//! Process environment adapter

use keel_application::ports::ProcessEnvironment;
use keel_domain::VariableMap;

/// Reads variables from the running process.
///
/// Variables whose name or value is not valid Unicode are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessEnvironment;

impl SystemProcessEnvironment {
    /// Creates a new process environment reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessEnvironment for SystemProcessEnvironment {
    fn snapshot(&self) -> VariableMap {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reads_process() {
        let snapshot = SystemProcessEnvironment::new().snapshot();
        let expected: VariableMap = std::env::vars().collect();
        for (name, value) in &expected {
            assert_eq!(snapshot.get(name), Some(value));
        }
    }
}
