//! Workspace settings
//!
//! Mirrors the `.azure/config.json` file `azd` keeps at the workspace root.

use serde::{Deserialize, Serialize};

/// Workspace-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Schema version for migration support.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Environment used when none is given explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_environment: Option<String>,
}

const fn default_version() -> u32 {
    1
}

impl WorkspaceConfig {
    /// Creates a config with no default environment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            version: 1,
            default_environment: None,
        }
    }

    /// Creates a config pointing at `environment`.
    #[must_use]
    pub fn with_default_environment(environment: impl Into<String>) -> Self {
        Self {
            version: 1,
            default_environment: Some(environment.into()),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self::new()
    }
}
