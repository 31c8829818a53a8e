//! List environments use case

use std::path::Path;

use crate::ports::{EnvironmentError, EnvironmentRepository};

/// Output containing the list of environments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEnvironmentsOutput {
    /// Environment names available in the workspace, sorted.
    pub environments: Vec<String>,

    /// The workspace default environment, if configured.
    pub default: Option<String>,
}

impl ListEnvironmentsOutput {
    /// Returns true if `name` is the workspace default.
    #[must_use]
    pub fn is_default(&self, name: &str) -> bool {
        self.default.as_deref() == Some(name)
    }
}

/// Lists all environments in a workspace.
pub struct ListEnvironments<R> {
    repository: R,
}

impl<R: EnvironmentRepository> ListEnvironments<R> {
    /// Creates a new `ListEnvironments` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `workspace` - Path to the workspace root
    ///
    /// # Returns
    /// The environment names and the configured default.
    #[allow(clippy::missing_errors_doc)]
    pub async fn execute(
        &self,
        workspace: &Path,
    ) -> Result<ListEnvironmentsOutput, EnvironmentError> {
        let environments = self.repository.list(workspace).await?;
        let default = self.repository.default_environment(workspace).await?;
        Ok(ListEnvironmentsOutput {
            environments,
            default,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockEnvironments;
    use keel_domain::Environment;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_list_environments_empty() {
        let use_case = ListEnvironments::new(MockEnvironments::new());

        let result = use_case.execute(&PathBuf::from("/test")).await;
        assert!(result.is_ok());

        let output = result.expect("Should succeed");
        assert!(output.environments.is_empty());
        assert_eq!(output.default, None);
    }

    #[tokio::test]
    async fn test_list_environments_with_entries() {
        let repo = MockEnvironments::new()
            .with(Environment::new("prod"))
            .with(Environment::new("dev"))
            .with(Environment::new("staging"))
            .with_default("dev");

        let use_case = ListEnvironments::new(repo);
        let output = use_case
            .execute(&PathBuf::from("/test"))
            .await
            .expect("Should succeed");

        assert_eq!(output.environments, vec!["dev", "prod", "staging"]);
        assert!(output.is_default("dev"));
        assert!(!output.is_default("prod"));
    }
}
