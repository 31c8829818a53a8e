//! Resolve parameters use case

use std::path::PathBuf;

use keel_domain::{ResolvedParameterSet, SecretHandling};
use tracing::info;

use super::sources::{SourceOptions, Sources};
use crate::error::ApplicationResult;
use crate::parameter_resolver::{ParameterResolver, ResolveOptions};
use crate::ports::{
    EnvironmentRepository, ProcessEnvironment, TemplateRepository, TypeHintsRepository,
};

/// Input for resolving a parameters document.
#[derive(Debug, Clone)]
pub struct ResolveParametersInput {
    /// Path to the parameters document.
    pub template: PathBuf,

    /// Where values and types come from.
    pub sources: SourceOptions,

    /// Whether secret values are kept or masked in the output.
    pub secrets: SecretHandling,

    /// Where to write the resolved document, if anywhere.
    pub output: Option<PathBuf>,
}

/// Output of a resolution.
#[derive(Debug, Clone)]
pub struct ResolveParametersOutput {
    /// Environment the values came from, if any.
    pub environment: Option<String>,

    /// The resolved document and its provenance.
    pub resolved: ResolvedParameterSet,

    /// Path the document was written to, if any.
    pub written_to: Option<PathBuf>,
}

/// Use case for resolving a parameters document against an environment.
pub struct ResolveParameters<T, E, H, P> {
    templates: T,
    sources: Sources<E, H, P>,
}

impl<T, E, H, P> ResolveParameters<T, E, H, P>
where
    T: TemplateRepository,
    E: EnvironmentRepository,
    H: TypeHintsRepository,
    P: ProcessEnvironment,
{
    /// Creates a new `ResolveParameters` use case.
    #[must_use]
    pub const fn new(templates: T, sources: Sources<E, H, P>) -> Self {
        Self { templates, sources }
    }

    /// Loads the template and sources, resolves, and optionally saves.
    ///
    /// # Errors
    /// - Returns error if the template, environment or type hints cannot be loaded
    /// - Returns error if a placeholder is missing, malformed or of the wrong type
    /// - Returns error if the output cannot be written
    pub async fn execute(
        &self,
        input: ResolveParametersInput,
    ) -> ApplicationResult<ResolveParametersOutput> {
        let template = self.templates.load(&input.template).await?;
        let loaded = self.sources.load(&input.sources).await?;

        let options = ResolveOptions {
            types: loaded.types,
            secrets: input.secrets,
        };
        let resolved =
            ParameterResolver::with_options(&loaded.context, options).resolve(&template)?;

        if let Some(path) = &input.output {
            self.templates.save(path, resolved.document()).await?;
        }

        info!(
            template = %input.template.display(),
            environment = loaded.environment.as_deref().unwrap_or("-"),
            written = input.output.is_some(),
            "resolved parameters"
        );

        Ok(ResolveParametersOutput {
            environment: loaded.environment,
            resolved,
            written_to: input.output,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::use_cases::test_support::{
        MockEnvironments, MockProcess, MockTemplates, MockTypeHints,
    };
    use keel_domain::{
        DomainError, Environment, ParameterTemplate, ParameterType, SECRET_MARKER, VariableScope,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::Path;

    fn template() -> ParameterTemplate {
        ParameterTemplate::new()
            .with_parameter("environmentName", json!("${AZURE_ENV_NAME}"))
            .with_parameter("location", json!("${AZURE_LOCATION}"))
            .with_parameter("useApim", json!("${USE_APIM=false}"))
            .with_parameter("principalId", json!("${AZURE_PRINCIPAL_ID=}"))
    }

    fn use_case(
        templates: MockTemplates,
        environments: MockEnvironments,
        types: MockTypeHints,
        process: MockProcess,
    ) -> ResolveParameters<MockTemplates, MockEnvironments, MockTypeHints, MockProcess> {
        ResolveParameters::new(templates, Sources::new(environments, types, process))
    }

    fn input(environment: Option<&str>) -> ResolveParametersInput {
        let mut sources = SourceOptions::new("/ws");
        sources.environment = environment.map(str::to_string);
        ResolveParametersInput {
            template: PathBuf::from("/ws/infra/main.parameters.json"),
            sources,
            secrets: SecretHandling::Reveal,
            output: None,
        }
    }

    #[tokio::test]
    async fn test_resolves_from_named_environment() {
        let templates = MockTemplates::with("/ws/infra/main.parameters.json", template());
        let environments = MockEnvironments::new()
            .with(Environment::with_variables("dev", [("AZURE_LOCATION", "eastus")]));
        let uc = use_case(
            templates,
            environments,
            MockTypeHints::default(),
            MockProcess::default(),
        );

        let output = uc.execute(input(Some("dev"))).await.unwrap();

        assert_eq!(output.environment.as_deref(), Some("dev"));
        assert_eq!(output.resolved.get("environmentName"), Some(&json!("dev")));
        assert_eq!(output.resolved.get("location"), Some(&json!("eastus")));
        assert_eq!(output.resolved.get("useApim"), Some(&json!("false")));
        assert_eq!(output.resolved.get("principalId"), Some(&json!("")));
        assert!(output.written_to.is_none());
    }

    #[tokio::test]
    async fn test_falls_back_to_default_environment() {
        let templates = MockTemplates::with("/ws/infra/main.parameters.json", template());
        let environments = MockEnvironments::new()
            .with(Environment::with_variables("prod", [("AZURE_LOCATION", "westus")]))
            .with_default("prod");
        let uc = use_case(
            templates,
            environments,
            MockTypeHints::default(),
            MockProcess::default(),
        );

        let output = uc.execute(input(None)).await.unwrap();

        assert_eq!(output.environment.as_deref(), Some("prod"));
        assert_eq!(output.resolved.get("location"), Some(&json!("westus")));
    }

    #[tokio::test]
    async fn test_layers_override_environment_and_process() {
        let templates = MockTemplates::with("/ws/infra/main.parameters.json", template());
        let environments = MockEnvironments::new()
            .with(Environment::with_variables("dev", [("AZURE_LOCATION", "eastus")]));
        let process = MockProcess::with([("AZURE_LOCATION", "northeurope"), ("USE_APIM", "true")]);
        let uc = use_case(templates, environments, MockTypeHints::default(), process);

        let mut request = input(Some("dev"));
        request
            .sources
            .overrides
            .push(("AZURE_PRINCIPAL_ID".to_string(), "abc".to_string()));
        let output = uc.execute(request).await.unwrap();

        assert_eq!(output.resolved.get("location"), Some(&json!("eastus")));
        assert_eq!(output.resolved.get("useApim"), Some(&json!("true")));
        assert_eq!(output.resolved.get("principalId"), Some(&json!("abc")));

        let scopes: Vec<(&str, VariableScope)> = output
            .resolved
            .variables()
            .iter()
            .map(|v| (v.name.as_str(), v.scope))
            .collect();
        assert_eq!(
            scopes,
            vec![
                ("AZURE_ENV_NAME", VariableScope::Environment),
                ("AZURE_LOCATION", VariableScope::Environment),
                ("USE_APIM", VariableScope::Process),
                ("AZURE_PRINCIPAL_ID", VariableScope::Override),
            ]
        );
    }

    #[tokio::test]
    async fn test_process_environment_can_be_excluded() {
        let templates = MockTemplates::with("/ws/infra/main.parameters.json", template());
        let process = MockProcess::with([("AZURE_ENV_NAME", "x"), ("AZURE_LOCATION", "eastus")]);
        let uc = use_case(templates, MockEnvironments::new(), MockTypeHints::default(), process);

        let mut request = input(None);
        request.sources.include_process = false;
        let err = uc.execute(request).await.unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingRequiredParameter { ref name, .. })
                if name == "AZURE_ENV_NAME"
        ));
    }

    #[tokio::test]
    async fn test_declared_types_coerce_values() {
        let templates = MockTemplates::with("/ws/infra/main.parameters.json", template());
        let environments = MockEnvironments::new()
            .with(Environment::with_variables("dev", [("AZURE_LOCATION", "eastus")]));
        let types = MockTypeHints::with([("useApim", ParameterType::Bool)]);
        let uc = use_case(templates, environments, types, MockProcess::default());

        let mut request = input(Some("dev"));
        request.sources.types = Some(PathBuf::from("/ws/infra/main.bicep"));
        let output = uc.execute(request).await.unwrap();

        assert_eq!(output.resolved.get("useApim"), Some(&json!(false)));
    }

    #[tokio::test]
    async fn test_writes_masked_output() {
        let document =
            ParameterTemplate::new().with_parameter("adminPassword", json!("${PASSWORD}"));
        let templates = MockTemplates::with("/ws/infra/main.parameters.json", document);
        let process = MockProcess::with([("PASSWORD", "hunter2")]);
        let types = MockTypeHints::with([("adminPassword", ParameterType::SecureString)]);
        let uc = use_case(templates, MockEnvironments::new(), types, process);

        let mut request = input(None);
        request.sources.types = Some(PathBuf::from("/ws/types.json"));
        request.secrets = SecretHandling::Mask;
        request.output = Some(PathBuf::from("/ws/out.json"));
        let output = uc.execute(request).await.unwrap();

        assert_eq!(output.written_to.as_deref(), Some(Path::new("/ws/out.json")));
        assert!(output.resolved.is_secret("/parameters/adminPassword/value"));
        let saved = uc.templates.saved(Path::new("/ws/out.json")).expect("saved");
        assert_eq!(
            saved.parameter("adminPassword").and_then(|e| e.value()),
            Some(&json!(SECRET_MARKER))
        );
    }

    #[tokio::test]
    async fn test_unknown_environment_fails() {
        let templates = MockTemplates::with("/ws/infra/main.parameters.json", template());
        let uc = use_case(
            templates,
            MockEnvironments::new(),
            MockTypeHints::default(),
            MockProcess::default(),
        );

        let err = uc.execute(input(Some("staging"))).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Environment(_)));
    }

    #[tokio::test]
    async fn test_invalid_environment_name_fails() {
        let templates = MockTemplates::with("/ws/infra/main.parameters.json", template());
        let uc = use_case(
            templates,
            MockEnvironments::new(),
            MockTypeHints::default(),
            MockProcess::default(),
        );

        let err = uc.execute(input(Some("../etc"))).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidEnvironmentName(_))
        ));
    }
}
