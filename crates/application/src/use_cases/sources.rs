//! Loading of the values and types that feed a resolution pass

use std::path::PathBuf;

use keel_domain::environment::validate_environment_name;
use keel_domain::{ParameterTypes, ResolutionContext};
use tracing::debug;

use crate::error::ApplicationResult;
use crate::ports::{EnvironmentRepository, ProcessEnvironment, TypeHintsRepository};

/// Variable that names the active environment.
pub const ENVIRONMENT_NAME_VARIABLE: &str = "AZURE_ENV_NAME";

/// Where variable values and declared types come from.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Workspace root containing `.azure/`.
    pub workspace: PathBuf,

    /// Environment to load. Falls back to the workspace default.
    pub environment: Option<String>,

    /// Explicit `KEY=VALUE` overrides, highest precedence.
    pub overrides: Vec<(String, String)>,

    /// JSON or Bicep file declaring parameter types.
    pub types: Option<PathBuf>,

    /// Whether the process environment is consulted.
    pub include_process: bool,
}

impl SourceOptions {
    /// Creates options for a workspace, reading the process environment.
    #[must_use]
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            environment: None,
            overrides: Vec::new(),
            types: None,
            include_process: true,
        }
    }
}

/// Everything a resolver needs besides the template.
#[derive(Debug, Clone)]
pub struct LoadedSources {
    /// Name of the environment that was loaded, if any.
    pub environment: Option<String>,

    /// Layered variable context.
    pub context: ResolutionContext,

    /// Declared parameter types.
    pub types: ParameterTypes,
}

/// Bundles the repositories that supply variables and types.
pub struct Sources<E, H, P> {
    environments: E,
    type_hints: H,
    process: P,
}

impl<E, H, P> Sources<E, H, P>
where
    E: EnvironmentRepository,
    H: TypeHintsRepository,
    P: ProcessEnvironment,
{
    /// Creates a new source bundle.
    #[must_use]
    pub const fn new(environments: E, type_hints: H, process: P) -> Self {
        Self {
            environments,
            type_hints,
            process,
        }
    }

    /// Loads the layered context and declared types.
    ///
    /// The environment is the explicit one, else the workspace default, else
    /// none. A loaded environment that does not define `AZURE_ENV_NAME` gets
    /// it set to its own name.
    ///
    /// # Errors
    /// - Returns error if the environment name is invalid or not found
    /// - Returns error if the type hints file cannot be loaded
    pub async fn load(&self, options: &SourceOptions) -> ApplicationResult<LoadedSources> {
        let name = match &options.environment {
            Some(name) => Some(name.clone()),
            None => {
                self.environments
                    .default_environment(&options.workspace)
                    .await?
            }
        };

        let mut context = ResolutionContext::new();
        if options.include_process {
            context = context.with_process(self.process.snapshot());
        }

        if let Some(name) = &name {
            validate_environment_name(name)?;
            let mut environment = self.environments.load(&options.workspace, name).await?;
            if environment.get_variable(ENVIRONMENT_NAME_VARIABLE).is_none() {
                environment.set_variable(ENVIRONMENT_NAME_VARIABLE, name.clone());
            }
            debug!(
                environment = %name,
                variables = environment.variable_count(),
                "loaded environment"
            );
            context = context.with_environment(&environment);
        }

        context = context.with_overrides(options.overrides.iter().cloned());

        let types = match &options.types {
            Some(path) => self.type_hints.load(path).await?,
            None => ParameterTypes::new(),
        };

        Ok(LoadedSources {
            environment: name,
            context,
            types,
        })
    }
}
