//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use keel_application::parameter_resolver::is_valid_name;

/// Resolves `${NAME}` / `${NAME=DEFAULT}` placeholders in ARM deployment-parameters files.
#[derive(Debug, Parser)]
#[command(name = "keel")]
#[command(version)]
pub struct Cli {
    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a parameters file and print or write the result
    Resolve {
        #[command(flatten)]
        source: SourceArgs,

        /// Keep secret values instead of writing `*****`
        #[arg(long)]
        reveal_secrets: bool,

        /// Write the resolved document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report missing and malformed placeholders without failing on the first one
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage workspace environments
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },
}

/// Environment subcommands.
#[derive(Debug, Subcommand)]
pub enum EnvAction {
    /// List environments in the workspace
    List {
        /// Workspace root containing `.azure/`
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
    },
}

/// Where the template and its values come from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Parameters file to resolve
    #[arg(short, long)]
    pub template: PathBuf,

    /// Environment name (defaults to the workspace default)
    #[arg(short, long, env = "AZURE_ENV_NAME")]
    pub environment: Option<String>,

    /// Workspace root containing `.azure/`
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// JSON or Bicep file declaring parameter types
    #[arg(long)]
    pub types: Option<PathBuf>,

    /// Override a variable (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub overrides: Vec<(String, String)>,

    /// Ignore the process environment
    #[arg(long)]
    pub no_process_env: bool,
}

/// Parses a `KEY=VALUE` override. The value may be empty or contain `=`.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if !is_valid_name(key) {
        return Err(format!("invalid variable name `{key}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
