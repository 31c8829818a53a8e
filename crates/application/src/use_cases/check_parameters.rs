//! Check parameters use case

use std::path::PathBuf;

use tracing::info;

use super::sources::{SourceOptions, Sources};
use crate::error::ApplicationResult;
use crate::parameter_resolver::{ParameterResolver, ResolutionReport};
use crate::ports::{
    EnvironmentRepository, ProcessEnvironment, TemplateRepository, TypeHintsRepository,
};

/// Input for checking a parameters document.
#[derive(Debug, Clone)]
pub struct CheckParametersInput {
    /// Path to the parameters document.
    pub template: PathBuf,

    /// Where values come from.
    pub sources: SourceOptions,
}

/// Output of a check.
#[derive(Debug, Clone)]
pub struct CheckParametersOutput {
    /// Environment the values came from, if any.
    pub environment: Option<String>,

    /// Everything the template references and what is missing.
    pub report: ResolutionReport,
}

/// Use case for reporting what a resolution would need, without failing.
pub struct CheckParameters<T, E, H, P> {
    templates: T,
    sources: Sources<E, H, P>,
}

impl<T, E, H, P> CheckParameters<T, E, H, P>
where
    T: TemplateRepository,
    E: EnvironmentRepository,
    H: TypeHintsRepository,
    P: ProcessEnvironment,
{
    /// Creates a new `CheckParameters` use case.
    #[must_use]
    pub const fn new(templates: T, sources: Sources<E, H, P>) -> Self {
        Self { templates, sources }
    }

    /// Loads the template and sources and scans every placeholder.
    ///
    /// Missing or malformed placeholders are reported, not returned as errors.
    ///
    /// # Errors
    /// Returns error if the template, environment or type hints cannot be loaded.
    pub async fn execute(
        &self,
        input: CheckParametersInput,
    ) -> ApplicationResult<CheckParametersOutput> {
        let template = self.templates.load(&input.template).await?;
        let loaded = self.sources.load(&input.sources).await?;

        let report = ParameterResolver::new(&loaded.context)
            .with_types(loaded.types)
            .check(&template);

        info!(
            template = %input.template.display(),
            references = report.references.len(),
            missing = report.missing.len(),
            malformed = report.malformed.len(),
            "checked parameters"
        );

        Ok(CheckParametersOutput {
            environment: loaded.environment,
            report,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        MockEnvironments, MockProcess, MockTemplates, MockTypeHints,
    };
    use keel_domain::{Environment, ParameterTemplate};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    async fn check(
        template: ParameterTemplate,
        environments: MockEnvironments,
        environment: Option<&str>,
    ) -> ApplicationResult<CheckParametersOutput> {
        let uc = CheckParameters::new(
            MockTemplates::with("/ws/main.parameters.json", template),
            Sources::new(environments, MockTypeHints::default(), MockProcess::default()),
        );
        let mut sources = SourceOptions::new("/ws");
        sources.environment = environment.map(str::to_string);

        uc.execute(CheckParametersInput {
            template: PathBuf::from("/ws/main.parameters.json"),
            sources,
        })
        .await
    }

    #[tokio::test]
    async fn test_complete_template() {
        let template = ParameterTemplate::new()
            .with_parameter("environmentName", json!("${AZURE_ENV_NAME}"))
            .with_parameter("sku", json!("${SKU=S0}"));
        let environments = MockEnvironments::new().with(Environment::new("dev"));

        let output = check(template, environments, Some("dev")).await.unwrap();

        assert!(output.report.is_complete());
        assert_eq!(output.environment.as_deref(), Some("dev"));
        assert_eq!(output.report.defaulted, vec!["SKU".to_string()]);
    }

    #[tokio::test]
    async fn test_reports_missing_and_malformed() {
        let template = ParameterTemplate::new()
            .with_parameter("location", json!("${AZURE_LOCATION}"))
            .with_parameter("broken", json!("${1BAD}"))
            .with_parameter("key", json!("${OPENAI_KEY}"));

        let output = check(template, MockEnvironments::new(), None).await.unwrap();

        assert!(!output.report.is_complete());
        assert_eq!(output.report.missing_names(), vec!["AZURE_LOCATION", "OPENAI_KEY"]);
        assert_eq!(output.report.malformed.len(), 1);
        assert_eq!(output.report.malformed[0].token, "${1BAD}");
    }

    #[tokio::test]
    async fn test_missing_template_is_an_error() {
        let uc = CheckParameters::new(
            MockTemplates::default(),
            Sources::new(
                MockEnvironments::new(),
                MockTypeHints::default(),
                MockProcess::default(),
            ),
        );

        let result = uc
            .execute(CheckParametersInput {
                template: PathBuf::from("/nope.json"),
                sources: SourceOptions::new("/ws"),
            })
            .await;
        assert!(result.is_err());
    }
}
