//! In-memory port implementations shared by use case tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use keel_domain::{
    Environment, ParameterTemplate, ParameterType, ParameterTypes, VariableMap, WorkspaceConfig,
};

use crate::ports::{
    EnvironmentError, EnvironmentRepository, ProcessEnvironment, TemplateError,
    TemplateRepository, TypeHintsError, TypeHintsRepository,
};

#[derive(Default)]
pub struct MockTemplates {
    templates: HashMap<PathBuf, ParameterTemplate>,
    saved: Mutex<HashMap<PathBuf, ParameterTemplate>>,
}

impl MockTemplates {
    pub fn with(path: &str, template: ParameterTemplate) -> Self {
        let mut templates = HashMap::new();
        templates.insert(PathBuf::from(path), template);
        Self {
            templates,
            saved: Mutex::new(HashMap::new()),
        }
    }

    pub fn saved(&self, path: &Path) -> Option<ParameterTemplate> {
        self.saved.lock().expect("Lock poisoned").get(path).cloned()
    }
}

#[async_trait]
impl TemplateRepository for MockTemplates {
    async fn load(&self, path: &Path) -> Result<ParameterTemplate, TemplateError> {
        self.templates
            .get(path)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(path.to_path_buf()))
    }

    async fn save(&self, path: &Path, document: &ParameterTemplate) -> Result<(), TemplateError> {
        self.saved
            .lock()
            .expect("Lock poisoned")
            .insert(path.to_path_buf(), document.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockEnvironments {
    environments: HashMap<String, Environment>,
    default: Option<String>,
}

impl MockEnvironments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, environment: Environment) -> Self {
        self.environments
            .insert(environment.name.clone(), environment);
        self
    }

    pub fn with_default(mut self, name: &str) -> Self {
        self.default = Some(name.to_string());
        self
    }
}

#[async_trait]
impl EnvironmentRepository for MockEnvironments {
    async fn load(&self, _: &Path, name: &str) -> Result<Environment, EnvironmentError> {
        self.environments
            .get(name)
            .cloned()
            .ok_or_else(|| EnvironmentError::NotFound(name.to_string()))
    }

    async fn list(&self, _: &Path) -> Result<Vec<String>, EnvironmentError> {
        let mut names: Vec<String> = self.environments.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn load_config(&self, _: &Path) -> Result<WorkspaceConfig, EnvironmentError> {
        Ok(self
            .default
            .as_ref()
            .map_or_else(WorkspaceConfig::new, |name| {
                WorkspaceConfig::with_default_environment(name.clone())
            }))
    }
}

#[derive(Default)]
pub struct MockTypeHints {
    types: ParameterTypes,
}

impl MockTypeHints {
    pub fn with<const N: usize>(types: [(&str, ParameterType); N]) -> Self {
        Self {
            types: types.into_iter().collect(),
        }
    }
}

#[async_trait]
impl TypeHintsRepository for MockTypeHints {
    async fn load(&self, _: &Path) -> Result<ParameterTypes, TypeHintsError> {
        Ok(self.types.clone())
    }
}

#[derive(Default)]
pub struct MockProcess {
    variables: VariableMap,
}

impl MockProcess {
    pub fn with<const N: usize>(variables: [(&str, &str); N]) -> Self {
        Self {
            variables: variables
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl ProcessEnvironment for MockProcess {
    fn snapshot(&self) -> VariableMap {
        self.variables.clone()
    }
}
