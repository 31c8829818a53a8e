//! Parameter resolution engine
//!
//! Resolves `${NAME}` / `${NAME=DEFAULT}` placeholders in a parameters document
//! against an environment source.

use indexmap::IndexMap;
use keel_domain::template::{ParameterEntry, mask_path, pointer};
use keel_domain::{
    DomainError, DomainResult, EnvironmentSource, ParameterTemplate, ParameterType,
    ParameterTypes, ResolvedParameterSet, ResolvedVariable, SecretHandling,
};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::coercion::coerce;
use super::parser::{Placeholder, has_placeholders, parse_placeholders, scan_placeholders};
use super::report::{MalformedReference, MissingReference, ResolutionReport};

/// Options that shape resolution beyond the environment itself.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Declared parameter types driving coercion.
    pub types: ParameterTypes,
    /// Whether secret values are kept or masked.
    pub secrets: SecretHandling,
}

/// Result of resolving a single string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedString {
    /// The string with all placeholders substituted.
    pub value: String,

    /// Variables taken from the environment source.
    pub variables: Vec<ResolvedVariable>,

    /// Names that fell back to their inline default.
    pub defaults_used: Vec<String>,
}

/// Accumulates what a resolution pass touched.
#[derive(Debug, Default)]
struct Session {
    secret_paths: Vec<String>,
    variables: Vec<ResolvedVariable>,
    defaults_used: Vec<String>,
}

impl Session {
    fn record_variable(&mut self, variable: ResolvedVariable) {
        if !self.variables.iter().any(|v| v.name == variable.name) {
            self.variables.push(variable);
        }
    }

    fn record_default(&mut self, name: &str) {
        if !self.defaults_used.iter().any(|n| n == name) {
            self.defaults_used.push(name.to_string());
        }
    }
}

/// Where a node sits: in the template (for errors) and in the output (for
/// secret paths). They differ once an unconfigured settings entry is dropped.
#[derive(Debug, Clone)]
struct Location {
    source: String,
    output: String,
}

impl Location {
    fn root() -> Self {
        Self {
            source: String::new(),
            output: String::new(),
        }
    }

    fn key(&self, key: &str) -> Self {
        Self {
            source: pointer::push_segment(&self.source, key),
            output: pointer::push_segment(&self.output, key),
        }
    }

    fn index(&self, source: usize, output: usize) -> Self {
        Self {
            source: pointer::push_segment(&self.source, &source.to_string()),
            output: pointer::push_segment(&self.output, &output.to_string()),
        }
    }
}

/// The parameter resolution engine.
///
/// Resolution is pure: the same template and source always give the same
/// output, and the first error in document order aborts the pass.
pub struct ParameterResolver<S> {
    source: S,
    options: ResolveOptions,
}

impl<S: EnvironmentSource> ParameterResolver<S> {
    /// Creates a new resolver with default options.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_options(source, ResolveOptions::default())
    }

    /// Creates a new resolver with the given options.
    #[must_use]
    pub const fn with_options(source: S, options: ResolveOptions) -> Self {
        Self { source, options }
    }

    /// Sets the declared parameter types.
    #[must_use]
    pub fn with_types(mut self, types: ParameterTypes) -> Self {
        self.options.types = types;
        self
    }

    /// Sets how secret values are emitted.
    #[must_use]
    pub const fn with_secret_handling(mut self, secrets: SecretHandling) -> Self {
        self.options.secrets = secrets;
        self
    }

    /// Resolves every placeholder in a parameters document.
    ///
    /// # Errors
    ///
    /// - [`DomainError::MissingRequiredParameter`] when a placeholder has no
    ///   value and no default
    /// - [`DomainError::MalformedPlaceholder`] when a `${` token is not valid
    /// - [`DomainError::TypeMismatch`] when a declared type cannot be satisfied
    pub fn resolve(&self, template: &ParameterTemplate) -> DomainResult<ResolvedParameterSet> {
        let mut session = Session::default();
        let root = Location::root();

        let schema = template
            .schema
            .as_deref()
            .map(|s| self.resolve_text(s, &root.key("$schema").source, &mut session))
            .transpose()?;
        let content_version = template
            .content_version
            .as_deref()
            .map(|s| self.resolve_text(s, &root.key("contentVersion").source, &mut session))
            .transpose()?;

        let parameters_at = root.key("parameters");
        let mut parameters = IndexMap::with_capacity(template.parameters.len());
        for (name, entry) in &template.parameters {
            let resolved = self.resolve_entry(name, entry, &parameters_at.key(name), &mut session)?;
            parameters.insert(name.clone(), resolved);
        }

        let mut extra = IndexMap::with_capacity(template.extra.len());
        for (key, value) in &template.extra {
            extra.insert(key.clone(), self.resolve_node(value, &root.key(key), &mut session)?);
        }

        let mut document = ParameterTemplate {
            schema,
            content_version,
            parameters,
            extra,
        };

        if self.options.secrets == SecretHandling::Mask {
            for path in &session.secret_paths {
                mask_path(&mut document, path);
            }
        }

        info!(
            parameters = document.parameter_count(),
            variables = session.variables.len(),
            defaults = session.defaults_used.len(),
            secrets = session.secret_paths.len(),
            "resolved parameters document"
        );

        Ok(ResolvedParameterSet::new(
            document,
            session.secret_paths,
            session.variables,
            session.defaults_used,
        ))
    }

    /// Resolves every placeholder in an arbitrary JSON value.
    ///
    /// Declared types do not apply here: there are no parameter names.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`], minus type mismatches.
    pub fn resolve_json(&self, value: &Value) -> DomainResult<Value> {
        self.resolve_node(value, &Location::root(), &mut Session::default())
    }

    /// Resolves all placeholders in one string.
    ///
    /// # Errors
    ///
    /// Returns an error when a placeholder is missing or malformed.
    pub fn resolve_str(&self, input: &str) -> DomainResult<ResolvedString> {
        let mut session = Session::default();
        let value = self.resolve_text(input, "", &mut session)?;

        Ok(ResolvedString {
            value,
            variables: session.variables,
            defaults_used: session.defaults_used,
        })
    }

    /// Reports what resolving `template` would need, without failing.
    #[must_use]
    pub fn check(&self, template: &ParameterTemplate) -> ResolutionReport {
        let mut report = ResolutionReport::default();
        let root = Location::root();

        if let Some(schema) = &template.schema {
            self.check_text(schema, &root.key("$schema").source, &mut report);
        }
        if let Some(version) = &template.content_version {
            self.check_text(version, &root.key("contentVersion").source, &mut report);
        }
        let parameters_at = root.key("parameters");
        for (name, entry) in &template.parameters {
            let entry_at = parameters_at.key(name);
            for (key, value) in entry.fields() {
                self.check_node(value, &entry_at.key(key).source, &mut report);
            }
        }
        for (key, value) in &template.extra {
            self.check_node(value, &root.key(key).source, &mut report);
        }

        report.finish();
        report
    }

    fn resolve_entry(
        &self,
        name: &str,
        entry: &ParameterEntry,
        at: &Location,
        session: &mut Session,
    ) -> DomainResult<ParameterEntry> {
        let declared = self.options.types.get(name);
        let mut fields = Map::with_capacity(entry.fields().len());

        for (key, value) in entry.fields() {
            let field_at = at.key(key);
            let resolved = if key == "value" {
                self.resolve_parameter_value(name, declared, value, &field_at, session)?
            } else {
                self.resolve_node(value, &field_at, session)?
            };
            fields.insert(key.clone(), resolved);
        }

        Ok(ParameterEntry::from_fields(fields))
    }

    fn resolve_parameter_value(
        &self,
        name: &str,
        declared: Option<ParameterType>,
        value: &Value,
        at: &Location,
        session: &mut Session,
    ) -> DomainResult<Value> {
        let resolved = match (value, declared) {
            (Value::String(text), Some(ty)) => {
                let placeholders = self.placeholders(text, &at.source)?;
                let whole = matches!(placeholders.as_slice(), [only] if only.covers(text));
                let substituted = self.substitute_all(text, &placeholders, &at.source, session)?;
                if whole {
                    coerce(name, ty, substituted)?
                } else {
                    Value::String(substituted)
                }
            }
            _ => self.resolve_node(value, at, session)?,
        };

        if declared.is_some_and(|ty| ty.is_secure()) {
            session.secret_paths.push(at.output.clone());
        }

        Ok(resolved)
    }

    fn resolve_node(
        &self,
        value: &Value,
        at: &Location,
        session: &mut Session,
    ) -> DomainResult<Value> {
        match value {
            Value::String(text) => {
                Ok(Value::String(self.resolve_text(text, &at.source, session)?))
            }
            Value::Array(items) => {
                let mut resolved_items = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_at = at.index(index, resolved_items.len());
                    let secrets_before = session.secret_paths.len();
                    let resolved = self.resolve_node(item, &item_at, session)?;

                    if is_unconfigured(&resolved) {
                        debug!(path = %item_at.source, "dropping settings entry with empty name");
                        session.secret_paths.truncate(secrets_before);
                        continue;
                    }

                    if is_secret_entry(&resolved) {
                        session.secret_paths.push(item_at.key("value").output);
                    }
                    resolved_items.push(resolved);
                }
                Ok(Value::Array(resolved_items))
            }
            Value::Object(map) => {
                let mut resolved = Map::with_capacity(map.len());
                for (key, child) in map {
                    resolved.insert(key.clone(), self.resolve_node(child, &at.key(key), session)?);
                }
                Ok(Value::Object(resolved))
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_text(&self, input: &str, path: &str, session: &mut Session) -> DomainResult<String> {
        if !has_placeholders(input) {
            return Ok(input.to_string());
        }

        let placeholders = self.placeholders(input, path)?;
        self.substitute_all(input, &placeholders, path, session)
    }

    #[allow(clippy::unused_self)]
    fn placeholders(&self, input: &str, path: &str) -> DomainResult<Vec<Placeholder>> {
        parse_placeholders(input).map_err(|malformed| DomainError::MalformedPlaceholder {
            token: malformed.token,
            path: path.to_string(),
        })
    }

    fn substitute_all(
        &self,
        input: &str,
        placeholders: &[Placeholder],
        path: &str,
        session: &mut Session,
    ) -> DomainResult<String> {
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for placeholder in placeholders {
            result.push_str(&input[last_end..placeholder.span.start]);
            result.push_str(&self.substitute(placeholder, path, session)?);
            last_end = placeholder.span.end;
        }

        result.push_str(&input[last_end..]);
        Ok(result)
    }

    fn substitute(
        &self,
        placeholder: &Placeholder,
        path: &str,
        session: &mut Session,
    ) -> DomainResult<String> {
        if let Some(variable) = self.source.lookup(&placeholder.name) {
            debug!(
                name = %variable.name,
                scope = variable.scope.display_name(),
                path,
                "substituted variable"
            );
            let value = variable.value.clone();
            session.record_variable(variable);
            return Ok(value);
        }

        if let Some(default) = &placeholder.default {
            debug!(name = %placeholder.name, path, "using inline default");
            session.record_default(&placeholder.name);
            return Ok(default.clone());
        }

        Err(DomainError::MissingRequiredParameter {
            name: placeholder.name.clone(),
            path: path.to_string(),
        })
    }

    fn check_node(&self, value: &Value, path: &str, report: &mut ResolutionReport) {
        match value {
            Value::String(text) => self.check_text(text, path, report),
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.check_node(item, &pointer::push_segment(path, &index.to_string()), report);
                }
            }
            Value::Object(map) => {
                for (key, child) in map {
                    self.check_node(child, &pointer::push_segment(path, key), report);
                }
            }
            _ => {}
        }
    }

    fn check_text(&self, input: &str, path: &str, report: &mut ResolutionReport) {
        if !has_placeholders(input) {
            return;
        }

        for token in scan_placeholders(input) {
            match token {
                Ok(placeholder) => {
                    report.references.push(placeholder.name.clone());
                    if self.source.contains(&placeholder.name) {
                        continue;
                    }
                    if placeholder.default.is_some() {
                        report.defaulted.push(placeholder.name);
                    } else {
                        report.missing.push(MissingReference {
                            name: placeholder.name,
                            path: path.to_string(),
                        });
                    }
                }
                Err(malformed) => report.malformed.push(MalformedReference {
                    token: malformed.token,
                    path: path.to_string(),
                }),
            }
        }
    }
}

/// A settings entry whose `name` is empty signals "not configured".
fn is_unconfigured(value: &Value) -> bool {
    matches!(value.get("name"), Some(Value::String(name)) if name.is_empty())
}

/// A settings entry with `"secret": true` and a `value`.
fn is_secret_entry(value: &Value) -> bool {
    let flagged = match value.get("secret") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
        _ => false,
    };
    flagged && value.get("value").is_some()
}

/// Resolves a parameters document against an environment source with default
/// options. Secret values come out as [`keel_domain::SECRET_MARKER`].
///
/// # Errors
///
/// See [`ParameterResolver::resolve`].
pub fn resolve<S: EnvironmentSource>(
    template: &ParameterTemplate,
    environment: S,
) -> DomainResult<ResolvedParameterSet> {
    ParameterResolver::new(environment).resolve(template)
}

/// Resolves an arbitrary JSON value against an environment source.
///
/// # Errors
///
/// See [`ParameterResolver::resolve_json`].
pub fn resolve_value<S: EnvironmentSource>(value: &Value, environment: S) -> DomainResult<Value> {
    ParameterResolver::new(environment).resolve_json(value)
}
