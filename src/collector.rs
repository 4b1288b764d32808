//! Collects the project configuration, question by question.

use log::debug;

use crate::answers::preloaded_text;
use crate::config::{Choice, Features, Identity, License, ProjectConfig, ProjectType, PythonVersion};
use crate::error::{Error, Result};
use crate::prompt::{
    ask_bool, ask_choice, ask_text, parse_bool, parse_choice, parse_text, Prompter, Validator,
};
use crate::tools::Toolchain;
use crate::validate::{validate_email, validate_project_name};

/// Defaults that come from outside the prompt session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub author_name: String,
    pub author_email: Option<String>,
}

impl Defaults {
    /// git `user.name` / `user.email`, falling back to `user` (usually `$USER`)
    /// and then to a fixed name.
    pub fn detect(tools: &dyn Toolchain, user: Option<String>) -> Self {
        let author_name = tools
            .git_config("user.name")
            .or(user)
            .unwrap_or_else(|| "Your Name".to_string());
        let author_email = tools.git_config("user.email");
        Self { author_name, author_email }
    }
}

/// Asks each question unless a preloaded answer already covers it.
pub struct Collector<'a> {
    prompter: &'a dyn Prompter,
    preloaded: &'a serde_json::Value,
}

impl<'a> Collector<'a> {
    pub fn new(prompter: &'a dyn Prompter, preloaded: &'a serde_json::Value) -> Self {
        Self { prompter, preloaded }
    }

    /// Preloaded answers skip the prompt but not the parser; a bad one is fatal.
    fn from_preloaded<T>(
        &self,
        key: &str,
        default: Option<&str>,
        parse: impl Fn(&str) -> std::result::Result<T, String>,
    ) -> Option<Result<T>> {
        let raw = preloaded_text(self.preloaded, key)?;
        debug!("Using preloaded answer for '{key}'");
        let answer = match (raw.trim(), default) {
            ("", Some(default)) => default,
            (answer, _) => answer,
        };
        Some(parse(answer).map_err(|message| {
            Error::ValidationError(format!("preloaded answer for '{key}' rejected: {message}"))
        }))
    }

    pub fn text(
        &self,
        key: &str,
        prompt: &str,
        default: Option<&str>,
        validator: Option<Validator>,
    ) -> Result<String> {
        match self.from_preloaded(key, default, |answer| parse_text(answer, validator)) {
            Some(answer) => answer,
            None => ask_text(self.prompter, prompt, default, validator),
        }
    }

    pub fn boolean(&self, key: &str, prompt: &str, default: bool) -> Result<bool> {
        let default_text = if default { "y" } else { "n" };
        let parse = |answer: &str| {
            parse_bool(answer).ok_or_else(|| "expected a yes/no value".to_string())
        };
        match self.from_preloaded(key, Some(default_text), parse) {
            Some(answer) => answer,
            None => ask_bool(self.prompter, prompt, default),
        }
    }

    pub fn choice<T: Choice>(&self, key: &str, prompt: &str, default: T) -> Result<T> {
        match self.from_preloaded(key, Some(default.as_str()), parse_choice::<T>) {
            Some(answer) => answer,
            None => ask_choice(self.prompter, prompt, default),
        }
    }
}

/// Runs the full question sequence and builds the configuration record.
pub fn collect_project_config(
    prompter: &dyn Prompter,
    defaults: &Defaults,
    preloaded: &serde_json::Value,
) -> Result<ProjectConfig> {
    let ask = Collector::new(prompter, preloaded);

    let project_name = ask.text(
        "project_name",
        "Project name (lowercase, hyphens allowed)",
        None,
        Some(validate_project_name),
    )?;
    let project_description = ask.text(
        "project_description",
        "Project description",
        Some("An awesome Python project"),
        None,
    )?;
    let author_name =
        ask.text("author_name", "Author name", Some(&defaults.author_name), None)?;
    let author_email = ask.text(
        "author_email",
        "Author email",
        defaults.author_email.as_deref(),
        Some(validate_email),
    )?;
    let github_default = author_name.to_lowercase().replace(' ', "");
    let github_username =
        ask.text("github_username", "GitHub username/organization", Some(&github_default), None)?;

    let project_type = ask.choice("project_type", "Project type", ProjectType::Library)?;
    let min_python_version =
        ask.choice("min_python_version", "Minimum Python version", PythonVersion::V3_9)?;
    let license = ask.choice("license", "License", License::Mit)?;

    let is_data = project_type == ProjectType::Data;
    let docker = ask.boolean("use_docker", "Include Docker configuration?", true)?;
    let pre_commit = ask.boolean("use_pre_commit", "Include pre-commit hooks?", true)?;
    let ci = ask.boolean("use_github_actions", "Include GitHub Actions CI/CD?", true)?;
    let notebooks = ask.boolean("use_jupyter", "Include Jupyter notebook support?", is_data)?;
    let spark = ask.boolean("use_spark", "Include PySpark configuration?", is_data)?;
    let cli = ask.boolean("use_cli", "Include CLI interface?", project_type == ProjectType::App)?;

    let data_sources = if is_data {
        ask.text(
            "data_sources",
            "Primary data sources (comma-separated)",
            Some("CSV files, APIs"),
            None,
        )?
    } else {
        String::new()
    };

    let context_doc =
        ask.boolean("setup_claude_md", "Create CLAUDE.md with project context?", true)?;

    let identity = Identity {
        project_name,
        project_description,
        author_name,
        author_email,
        github_username,
        project_type,
        min_python_version,
        license,
        data_sources,
    };
    let features = Features { docker, pre_commit, ci, notebooks, spark, cli, context_doc };

    Ok(ProjectConfig::new(identity, features))
}
