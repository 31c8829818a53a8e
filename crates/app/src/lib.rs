//! Keel - ARM deployment-parameter resolver
//!
//! Wires the file-based adapters into the application use cases and renders
//! their results for the command line.

pub mod cli;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use keel_application::{
    CheckParameters, CheckParametersInput, ListEnvironments, ResolveParameters,
    ResolveParametersInput, SourceOptions, Sources,
};
use keel_domain::SecretHandling;
use keel_infrastructure::{
    AzdEnvironmentRepository, FileTemplateRepository, FileTypeHintsRepository,
    SystemProcessEnvironment, TokioFileSystem, to_json_stable,
};

use crate::cli::{Cli, Command, EnvAction, SourceArgs};

type FileSources = Sources<
    AzdEnvironmentRepository<TokioFileSystem>,
    FileTypeHintsRepository<TokioFileSystem>,
    SystemProcessEnvironment,
>;

fn file_sources() -> FileSources {
    let fs = TokioFileSystem::new();
    Sources::new(
        AzdEnvironmentRepository::new(fs),
        FileTypeHintsRepository::new(fs),
        SystemProcessEnvironment::new(),
    )
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Success,
    /// `check` found missing or malformed placeholders.
    Incomplete,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Incomplete => Self::FAILURE,
        }
    }
}

impl From<SourceArgs> for SourceOptions {
    fn from(args: SourceArgs) -> Self {
        let mut options = Self::new(args.workspace);
        options.environment = args.environment;
        options.overrides = args.overrides;
        options.types = args.types;
        options.include_process = !args.no_process_env;
        options
    }
}

/// Runs a parsed command, writing its report to `out`.
///
/// # Errors
///
/// Returns an error if loading, resolution or writing fails.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> Result<Outcome> {
    match cli.command {
        Command::Resolve {
            source,
            reveal_secrets,
            output,
        } => resolve(source, reveal_secrets, output, out).await,
        Command::Check { source } => check(source, out).await,
        Command::Env {
            action: EnvAction::List { workspace },
        } => {
            let repository = AzdEnvironmentRepository::new(TokioFileSystem::new());
            let listed = ListEnvironments::new(repository)
                .execute(&workspace)
                .await
                .with_context(|| format!("listing environments in {}", workspace.display()))?;

            for name in &listed.environments {
                if listed.is_default(name) {
                    writeln!(out, "{name} (default)")?;
                } else {
                    writeln!(out, "{name}")?;
                }
            }
            Ok(Outcome::Success)
        }
    }
}

async fn resolve<W: Write>(
    source: SourceArgs,
    reveal_secrets: bool,
    output: Option<PathBuf>,
    out: &mut W,
) -> Result<Outcome> {
    let template = source.template.clone();
    let use_case =
        ResolveParameters::new(FileTemplateRepository::new(TokioFileSystem::new()), file_sources());

    let resolved = use_case
        .execute(ResolveParametersInput {
            template: source.template.clone(),
            sources: source.into(),
            secrets: if reveal_secrets {
                SecretHandling::Reveal
            } else {
                SecretHandling::Mask
            },
            output,
        })
        .await
        .with_context(|| format!("resolving {}", template.display()))?;

    if resolved.written_to.is_none() {
        out.write_all(to_json_stable(resolved.resolved.document())?.as_bytes())?;
    }
    Ok(Outcome::Success)
}

async fn check<W: Write>(source: SourceArgs, out: &mut W) -> Result<Outcome> {
    let template = source.template.clone();
    let use_case =
        CheckParameters::new(FileTemplateRepository::new(TokioFileSystem::new()), file_sources());

    let checked = use_case
        .execute(CheckParametersInput {
            template: source.template.clone(),
            sources: source.into(),
        })
        .await
        .with_context(|| format!("checking {}", template.display()))?;
    let report = &checked.report;

    writeln!(
        out,
        "environment: {}",
        checked.environment.as_deref().unwrap_or("(none)")
    )?;
    writeln!(out, "references: {}", report.references.join(", "))?;
    for missing in &report.missing {
        writeln!(out, "missing: {} at {}", missing.name, missing.path)?;
    }
    for malformed in &report.malformed {
        writeln!(out, "malformed: {} at {}", malformed.token, malformed.path)?;
    }
    for name in &report.defaulted {
        writeln!(out, "default: {name}")?;
    }

    if report.is_complete() {
        writeln!(out, "ok")?;
        Ok(Outcome::Success)
    } else {
        Ok(Outcome::Incomplete)
    }
}
