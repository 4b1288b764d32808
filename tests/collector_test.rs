mod common;

use kiln::answers::parse_answers;
use kiln::collector::{collect_project_config, Defaults};
use kiln::config::{License, ProjectType, PythonVersion};
use kiln::error::Error;
use kiln::prompt::ScriptedPrompter;

use common::RecordingToolchain;

fn defaults() -> Defaults {
    Defaults { author_name: "Jane Doe".to_string(), author_email: Some("jane@example.com".to_string()) }
}

#[test]
fn test_defaults_prefer_git_config() {
    let tools = RecordingToolchain::default();
    let detected = Defaults::detect(&tools, Some("jane".to_string()));

    assert_eq!(detected.author_name, "Git User");
    assert_eq!(detected.author_email.as_deref(), Some("git@example.com"));
}

#[test]
fn test_library_with_defaults() {
    // name, then an empty line for every remaining question
    let mut script = vec!["my-lib"];
    script.extend([""; 14]);
    let prompter = ScriptedPrompter::new(script);

    let config = collect_project_config(&prompter, &defaults(), &serde_json::Value::Null).unwrap();

    let identity = config.identity();
    assert_eq!(identity.project_name, "my-lib");
    assert_eq!(identity.project_description, "An awesome Python project");
    assert_eq!(identity.github_username, "janedoe");
    assert_eq!(identity.project_type, ProjectType::Library);
    assert_eq!(identity.min_python_version, PythonVersion::V3_9);
    assert_eq!(identity.license, License::Mit);
    assert_eq!(identity.data_sources, "");

    let features = config.features();
    assert!(features.docker && features.pre_commit && features.ci && features.context_doc);
    assert!(!features.notebooks && !features.spark && !features.cli);
    assert_eq!(config.python_package_name(), "my_lib");
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn test_invalid_name_is_asked_again() {
    let mut script = vec!["Test", "test", "my-lib"];
    script.extend([""; 14]);
    let prompter = ScriptedPrompter::new(script);

    let config = collect_project_config(&prompter, &defaults(), &serde_json::Value::Null).unwrap();

    assert_eq!(config.project_name(), "my-lib");
    assert_eq!(prompter.hints().len(), 2);
}

#[test]
fn test_data_project_defaults() {
    let preloaded = parse_answers(
        r#"{"project_name": "pipeline", "project_type": "data", "author_email": "a@b.io"}"#,
    )
    .unwrap();
    // the remaining thirteen questions, data sources included, take their defaults
    let prompter = ScriptedPrompter::new([""; 13]);

    let config = collect_project_config(&prompter, &defaults(), &preloaded).unwrap();

    assert_eq!(config.project_name(), "pipeline");
    assert_eq!(config.project_type(), ProjectType::Data);
    assert!(config.features().notebooks);
    assert!(config.features().spark);
    assert!(!config.features().cli);
    assert_eq!(config.identity().data_sources, "CSV files, APIs");
    assert!(prompter.prompts().iter().any(|p| p.starts_with("Primary data sources")));
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn test_fully_preloaded_answers_ask_nothing() {
    let preloaded = parse_answers(
        r#"
project_name: cli-tool
project_description: A command line tool
author_name: Sam Smith
author_email: sam@example.org
github_username: samsmith
project_type: "1"
min_python_version: "3.12"
license: Apache-2.0
use_docker: false
use_pre_commit: true
use_github_actions: no
use_jupyter: false
use_spark: false
use_cli: true
setup_claude_md: false
"#,
    )
    .unwrap();
    let prompter = ScriptedPrompter::new(Vec::<String>::new());

    let config = collect_project_config(&prompter, &defaults(), &preloaded).unwrap();

    assert!(prompter.prompts().is_empty());
    assert_eq!(config.project_type(), ProjectType::App);
    assert_eq!(config.identity().min_python_version, PythonVersion::V3_12);
    assert_eq!(config.identity().license, License::Apache2);
    assert!(!config.features().docker);
    assert!(!config.features().ci);
    assert!(config.features().cli);
    assert!(!config.features().context_doc);
}

#[test]
fn test_invalid_preloaded_answer_is_fatal() {
    let preloaded = parse_answers(r#"{"project_name": "Bad Name"}"#).unwrap();
    let prompter = ScriptedPrompter::new(Vec::<String>::new());

    let err = collect_project_config(&prompter, &defaults(), &preloaded).unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
}

#[test]
fn test_exhausted_input_is_an_error() {
    let prompter = ScriptedPrompter::new(["my-lib"]);

    let err = collect_project_config(&prompter, &defaults(), &serde_json::Value::Null).unwrap_err();
    assert!(matches!(err, Error::PromptError(_)));
}
