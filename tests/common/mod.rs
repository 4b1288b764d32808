#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use kiln::config::{Features, Identity, License, ProjectConfig, ProjectType, PythonVersion};
use kiln::error::{Error, Result};
use kiln::tools::Toolchain;

pub fn identity(project_type: ProjectType) -> Identity {
    Identity {
        project_name: "my-lib".to_string(),
        project_description: "An awesome Python project".to_string(),
        author_name: "Jane Doe".to_string(),
        author_email: "jane@example.com".to_string(),
        github_username: "janedoe".to_string(),
        project_type,
        min_python_version: PythonVersion::V3_11,
        license: License::Mit,
        data_sources: String::new(),
    }
}

pub fn config(features: Features) -> ProjectConfig {
    ProjectConfig::new(identity(ProjectType::Library), features)
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small template checkout: generator script, marker config, raw package
/// directory, plus one file for each feature group.
pub fn template_checkout(root: &Path) {
    write_file(root, "setup_project.py", "print('setting up {{PROJECT_NAME}}')\n");
    write_file(root, ".template.toml", "[template]\nname = \"python\"\n");
    write_file(root, "ROADMAP.md", "# Roadmap\n");
    write_file(root, "docs/TEMPLATE_SETUP.md", "# Template setup\n");
    write_file(root, "docs/GITHUB_LABELS.md", "# Labels\n");
    write_file(root, "README.md", "# {{PROJECT_NAME}}\n\n{{PROJECT_DESCRIPTION}}\n");
    write_file(root, "pyproject.toml.template", "[project]\nname = \"{{PROJECT_NAME}}\"\n");
    write_file(root, "src/{{PROJECT_NAME}}/__init__.py", "\"\"\"{{PROJECT_NAME}} package.\"\"\"\n");
    write_file(root, "src/{{PROJECT_NAME}}/spark_utils.py", "APP = \"{{PROJECT_NAME}}\"\n");
    write_file(root, "tests/test_{{PROJECT_NAME}}.py", "import {{PYTHON_PACKAGE_NAME}}\n");
    write_file(root, "scripts/setup_spark.py", "from {{PYTHON_PACKAGE_NAME}} import spark_utils\n");
    write_file(root, "Dockerfile.dev", "FROM python:{{MIN_PYTHON_VERSION}}\n");
    write_file(root, "Dockerfile.data", "FROM jupyter/base-notebook\n");
    write_file(root, "docker-compose.yml", "name: {{PROJECT_NAME}}\n");
    write_file(root, ".pre-commit-config.yaml", "repos: []\n");
    write_file(root, ".github/workflows/ci.yml", "name: CI\n");
    write_file(root, ".github/workflow-templates/release.yml", "name: Release\n");
    write_file(root, "notebooks/explore.ipynb", "{\"cells\": []}\n");
}

/// Records every call and never touches a real binary.
#[derive(Debug, Default)]
pub struct RecordingToolchain {
    pub calls: RefCell<Vec<String>>,
    pub has_repository: bool,
    pub fail_git: bool,
    pub fail_sync: bool,
    pub task_runner: bool,
}

impl RecordingToolchain {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn outcome(&self, command: &str, fail: bool) -> Result<()> {
        if fail {
            Err(Error::CommandError { command: command.to_string(), reason: "exit status 1".to_string() })
        } else {
            Ok(())
        }
    }
}

impl Toolchain for RecordingToolchain {
    fn git_config(&self, key: &str) -> Option<String> {
        self.record(format!("git config {key}"));
        match key {
            "user.name" => Some("Git User".to_string()),
            "user.email" => Some("git@example.com".to_string()),
            _ => None,
        }
    }

    fn ensure_dependency_manager(&self) -> Result<()> {
        self.record("uv --version");
        Ok(())
    }

    fn task_runner_available(&self) -> bool {
        self.record("just --version");
        self.task_runner
    }

    fn install_task_runner(&self) -> Result<()> {
        self.record("install just");
        Ok(())
    }

    fn has_repository(&self, _dir: &Path) -> bool {
        self.has_repository
    }

    fn init_repository(&self, _dir: &Path) -> Result<()> {
        self.record("git init");
        self.outcome("git init", self.fail_git)
    }

    fn sync_dependencies(&self, _dir: &Path, extras: &[&str]) -> Result<()> {
        self.record(format!("uv sync {}", extras.join(",")));
        self.outcome("uv sync", self.fail_sync)
    }

    fn install_hooks(&self, _dir: &Path) -> Result<()> {
        self.record("pre-commit install");
        Ok(())
    }
}
