//! Application use cases (business logic orchestration).

mod check_parameters;
mod list_environments;
mod resolve_parameters;
mod sources;

#[cfg(test)]
mod test_support;

pub use check_parameters::{CheckParameters, CheckParametersInput, CheckParametersOutput};
pub use list_environments::{ListEnvironments, ListEnvironmentsOutput};
pub use resolve_parameters::{ResolveParameters, ResolveParametersInput, ResolveParametersOutput};
pub use sources::{ENVIRONMENT_NAME_VARIABLE, LoadedSources, SourceOptions, Sources};
