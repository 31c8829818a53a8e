//! End-to-end tests for the `keel` commands against a real workspace on disk.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use clap::Parser;
use keel::Outcome;
use keel::cli::Cli;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

const TEMPLATE: &str = r#"{
  "$schema": "https://schema.management.azure.com/schemas/2019-04-01/deploymentParameters.json#",
  "contentVersion": "1.0.0.0",
  "parameters": {
    "environmentName": { "value": "${AZURE_ENV_NAME}" },
    "location": { "value": "${AZURE_LOCATION}" },
    "useApim": { "value": "${USE_APIM=false}" },
    "openAiCapacity": { "value": "${AZURE_OPENAI_CAPACITY=30}" },
    "adminPassword": { "value": "${ADMIN_PASSWORD}" },
    "appSettings": {
      "value": [
        { "name": "OPENAI_ENDPOINT", "value": "${OPENAI_ENDPOINT=}", "secret": false },
        { "name": "${OPTIONAL_SETTING=}", "value": "${OPTIONAL_VALUE=}" },
        { "name": "OPENAI_KEY", "value": "${OPENAI_KEY}", "secret": true }
      ]
    }
  }
}
"#;

const BICEP: &str = "param environmentName string
param location string
param useApim bool = false
param openAiCapacity int = 30
@secure()
param adminPassword string
param appSettings array
";

fn workspace() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    let infra = dir.path().join("infra");
    std::fs::create_dir_all(&infra).unwrap();
    std::fs::write(infra.join("main.parameters.json"), TEMPLATE).unwrap();
    std::fs::write(infra.join("main.bicep"), BICEP).unwrap();

    let env_dir = dir.path().join(".azure/dev");
    std::fs::create_dir_all(&env_dir).unwrap();
    std::fs::write(
        env_dir.join(".env"),
        "AZURE_ENV_NAME=\"dev\"\nAZURE_LOCATION=\"eastus\"\nADMIN_PASSWORD=\"hunter2\"\nOPENAI_KEY=\"sk-123\"\n",
    )
    .unwrap();
    std::fs::create_dir_all(dir.path().join(".azure/prod")).unwrap();
    std::fs::write(dir.path().join(".azure/prod/.env"), "AZURE_LOCATION=westus\n").unwrap();
    std::fs::write(
        dir.path().join(".azure/config.json"),
        r#"{"version":1,"defaultEnvironment":"dev"}"#,
    )
    .unwrap();
    dir
}

async fn run(workspace: &Path, args: &[&str]) -> (Outcome, String) {
    let workspace = workspace.to_str().unwrap();
    let mut argv = vec!["keel"];
    argv.extend_from_slice(args);
    argv.extend_from_slice(&["-w", workspace]);

    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    let mut out = Vec::new();
    let code = keel::run(cli, &mut out).await.expect("command should succeed");
    (code, String::from_utf8(out).unwrap())
}

fn template_arg(dir: &TempDir) -> String {
    dir.path()
        .join("infra/main.parameters.json")
        .to_string_lossy()
        .into_owned()
}

#[tokio::test]
async fn test_resolve_prints_document() {
    let dir = workspace();
    let template = template_arg(&dir);

    let (code, stdout) = run(
        dir.path(),
        &["resolve", "-t", &template, "-e", "dev", "--no-process-env"],
    )
    .await;

    assert_eq!(code, Outcome::Success);
    assert!(stdout.ends_with("}\n"));
    let doc: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        doc["parameters"],
        json!({
            "environmentName": { "value": "dev" },
            "location": { "value": "eastus" },
            "useApim": { "value": "false" },
            "openAiCapacity": { "value": "30" },
            "adminPassword": { "value": "hunter2" },
            "appSettings": {
                "value": [
                    { "name": "OPENAI_ENDPOINT", "value": "", "secret": false },
                    { "name": "OPENAI_KEY", "value": "*****", "secret": true }
                ]
            }
        })
    );
}

#[tokio::test]
async fn test_resolve_reveal_secrets() {
    let dir = workspace();
    let template = template_arg(&dir);
    let types = dir.path().join("infra/main.bicep");

    let (code, stdout) = run(
        dir.path(),
        &[
            "resolve",
            "-t",
            &template,
            "-e",
            "dev",
            "--no-process-env",
            "--types",
            types.to_str().unwrap(),
            "--reveal-secrets",
        ],
    )
    .await;

    assert_eq!(code, Outcome::Success);
    let doc: Value = serde_json::from_str(&stdout).unwrap();
    let parameters = &doc["parameters"];
    assert_eq!(parameters["adminPassword"]["value"], json!("hunter2"));
    assert_eq!(parameters["appSettings"]["value"][1]["value"], json!("sk-123"));
}

#[tokio::test]
async fn test_resolve_with_types_and_masking() {
    let dir = workspace();
    let template = template_arg(&dir);
    let types = dir.path().join("infra/main.bicep");
    let output = dir.path().join("out/main.parameters.resolved.json");

    let (code, stdout) = run(
        dir.path(),
        &[
            "resolve",
            "-t",
            &template,
            "-e",
            "dev",
            "--no-process-env",
            "--types",
            types.to_str().unwrap(),
            "--set",
            "USE_APIM=TRUE",
            "-o",
            output.to_str().unwrap(),
        ],
    )
    .await;

    assert_eq!(code, Outcome::Success);
    assert!(stdout.is_empty());

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let parameters = &doc["parameters"];
    assert_eq!(parameters["useApim"]["value"], json!(true));
    assert_eq!(parameters["openAiCapacity"]["value"], json!(30));
    assert_eq!(parameters["adminPassword"]["value"], json!("*****"));
    assert_eq!(parameters["appSettings"]["value"][1]["value"], json!("*****"));
    assert_eq!(parameters["appSettings"]["value"][0]["value"], json!(""));
}

#[tokio::test]
async fn test_resolve_reports_missing_parameter() {
    let dir = workspace();
    let template = template_arg(&dir);
    let argv = [
        "keel",
        "resolve",
        "-t",
        &template,
        "-e",
        "prod",
        "--no-process-env",
        "-w",
        dir.path().to_str().unwrap(),
    ];

    let cli = Cli::try_parse_from(argv).unwrap();
    let err = keel::run(cli, &mut Vec::new()).await.unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("ADMIN_PASSWORD"), "{message}");
}

#[tokio::test]
async fn test_check_reports_missing_names() {
    let dir = workspace();
    let template = template_arg(&dir);

    let (code, stdout) = run(
        dir.path(),
        &["check", "-t", &template, "-e", "prod", "--no-process-env"],
    )
    .await;

    assert_eq!(code, Outcome::Incomplete);
    assert!(stdout.contains("environment: prod"));
    assert!(stdout.contains("missing: ADMIN_PASSWORD at /parameters/adminPassword/value"));
    assert!(stdout.contains("missing: OPENAI_KEY at /parameters/appSettings/value/2/value"));
    assert!(stdout.contains("default: USE_APIM"));
    assert!(!stdout.contains("ok\n"));
}

#[tokio::test]
async fn test_check_complete_environment() {
    let dir = workspace();
    let template = template_arg(&dir);

    let (code, stdout) = run(
        dir.path(),
        &["check", "-t", &template, "-e", "dev", "--no-process-env"],
    )
    .await;

    assert_eq!(code, Outcome::Success);
    assert!(stdout.ends_with("ok\n"));
}

#[tokio::test]
async fn test_env_list_marks_default() {
    let dir = workspace();

    let (code, stdout) = run(dir.path(), &["env", "list"]).await;

    assert_eq!(code, Outcome::Success);
    assert_eq!(stdout, "dev (default)\nprod\n");
}
