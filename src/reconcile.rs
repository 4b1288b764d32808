//! Top-level generation workflows.
//!
//! A project is generated either into a new directory, or in place over a
//! template checkout. In place, the rendered tree is staged in a scratch
//! directory first so the walk never reads its own output.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, warn};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::cli::Mode;
use crate::config::{ProjectConfig, ProjectType};
use crate::constants::{GENERATOR_SCRIPT, PLACEHOLDER_PACKAGE_DIR, TEMPLATE_MARKER, VERIFY_PATTERNS};
use crate::context_doc::write_context_doc;
use crate::error::{Error, Result};
use crate::loader::LoadedTemplate;
use crate::placeholder::{find_tokens, PlaceholderRenderer};
use crate::processor::{is_skipped_dir, process_template_directory};
use crate::prompt::{confirm, Prompter};
use crate::renderer::TemplateRenderer;
use crate::selector::{compute_removals, RemovalList};
use crate::tools::Toolchain;

/// Unresolved placeholder files listed before truncating.
const REPORT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workflow {
    /// Render into a fresh `target` directory.
    NewDirectory { target: PathBuf },
    /// Render over the template checkout at `root`.
    InPlace { root: PathBuf },
}

/// Checks for the generator script, the marker config and the raw package
/// directory, all at once.
pub fn is_template_checkout(dir: &Path) -> bool {
    dir.join(GENERATOR_SCRIPT).is_file()
        && dir.join(TEMPLATE_MARKER).is_file()
        && dir.join(PLACEHOLDER_PACKAGE_DIR).is_dir()
}

/// Picks the workflow for this run.
///
/// `auto` works in place only when the template is the local working
/// directory and looks like a template checkout.
pub fn select_workflow(
    mode: Mode,
    template: &LoadedTemplate,
    working_dir: &Path,
    output_dir: &Path,
    project_name: &str,
) -> Result<Workflow> {
    let root = template.root();
    let checkout = !template.is_remote() && is_template_checkout(root);
    let new_directory = || Workflow::NewDirectory { target: output_dir.join(project_name) };

    match mode {
        Mode::NewDir => Ok(new_directory()),
        Mode::InPlace if checkout => Ok(Workflow::InPlace { root: root.to_path_buf() }),
        Mode::InPlace => Err(Error::ConfigError(format!(
            "'{}' is not a template checkout; in-place generation needs {GENERATOR_SCRIPT}, \
             {TEMPLATE_MARKER} and {PLACEHOLDER_PACKAGE_DIR}",
            root.display()
        ))),
        Mode::Auto => {
            let is_working_dir = working_dir.canonicalize().is_ok_and(|cwd| cwd == root);
            if checkout && is_working_dir {
                Ok(Workflow::InPlace { root: root.to_path_buf() })
            } else {
                Ok(new_directory())
            }
        }
    }
}

/// Outcome of a generation run.
#[derive(Debug)]
pub struct GenerationReport {
    pub project_dir: PathBuf,
    pub written: usize,
    pub removed: usize,
    /// Files still carrying a placeholder token, relative to `project_dir`.
    pub unresolved: Vec<PathBuf>,
}

/// Deletes every listed path under `root`. Missing paths are fine; other
/// failures are logged and skipped.
///
/// # Returns
/// * number of paths actually removed
pub fn apply_removals(root: &Path, removals: &RemovalList) -> usize {
    let mut removed = 0;
    for relative in removals.iter() {
        let path = root.join(relative);
        let result = match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&path),
            Ok(_) => fs::remove_file(&path),
            Err(_) => continue,
        };
        match result {
            Ok(()) => {
                debug!("Removed '{}'", relative.display());
                removed += 1;
            }
            Err(e) => warn!("Could not remove '{}': {e}", path.display()),
        }
    }
    removed
}

/// Copies every file under `from` to the same relative path under `to`,
/// leaving out anything `skip` covers.
///
/// # Returns
/// * number of files copied
pub fn copy_tree(from: &Path, to: &Path, skip: &RemovalList) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(from) else { continue };
        if skip.covers(relative) {
            debug!("Not copying '{}': slated for removal", relative.display());
            continue;
        }

        let target = to.join(relative);
        let result = target
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::copy(entry.path(), &target));
        match result {
            Ok(_) => copied += 1,
            Err(e) => warn!("Could not copy '{}': {e}", relative.display()),
        }
    }
    Ok(copied)
}

fn verify_globs() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in VERIFY_PATTERNS {
        builder.add(Glob::new(pattern).map_err(|e| Error::TemplateError(e.to_string()))?);
    }
    builder.build().map_err(|e| Error::TemplateError(e.to_string()))
}

/// Text files under `root` whose content still holds a `{{NAME}}` token.
pub fn find_unresolved_placeholders(root: &Path) -> Result<Vec<PathBuf>> {
    let globs = verify_globs()?;
    let mut unresolved = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker.filter_map(|entry| entry.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else { continue };
        if !globs.is_match(relative) {
            continue;
        }
        let Ok(content) = fs::read_to_string(entry.path()) else { continue };
        if find_tokens(&content).next().is_some() {
            unresolved.push(relative.to_path_buf());
        }
    }

    Ok(unresolved)
}

/// Formats the unresolved-placeholder warning; `None` when there is nothing to report.
pub fn unresolved_summary(files: &[PathBuf]) -> Option<String> {
    if files.is_empty() {
        return None;
    }

    let mut summary = format!("Unresolved placeholders remain in {} file(s):", files.len());
    for file in files.iter().take(REPORT_LIMIT) {
        summary.push_str(&format!("\n  - {}", file.display()));
    }
    if files.len() > REPORT_LIMIT {
        summary.push_str(&format!("\n  ... and {} more", files.len() - REPORT_LIMIT));
    }
    Some(summary)
}

/// Token names the template uses that the configuration cannot resolve.
pub fn unknown_tokens(template_root: &Path, renderer: &PlaceholderRenderer) -> BTreeSet<String> {
    let mut unknown = BTreeSet::new();
    let mut note = |text: &str| {
        for token in find_tokens(text) {
            if !renderer.resolves(token) {
                unknown.insert(token.to_string());
            }
        }
    };

    let walker = WalkDir::new(template_root)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));
    for entry in walker.filter_map(|entry| entry.ok()) {
        note(entry.file_name().to_string_lossy().as_ref());
        if entry.file_type().is_file() {
            if let Ok(content) = fs::read_to_string(entry.path()) {
                note(content.as_str());
            }
        }
    }

    unknown
}

/// Makes sure the tools the generated project depends on are present.
///
/// A missing dependency manager is fatal. A missing task runner is offered
/// for installation; declining or failing only warns.
pub fn check_dependencies(tools: &dyn Toolchain, prompter: &dyn Prompter) -> Result<()> {
    tools.ensure_dependency_manager()?;

    if tools.task_runner_available() {
        debug!("just is already installed");
        return Ok(());
    }

    println!("just is not installed. It provides the generated project's development commands.");
    if !confirm(prompter, false, "Would you like to install just automatically?")? {
        warn!("Continuing without just; install it from https://github.com/casey/just#installation");
        return Ok(());
    }

    match tools.install_task_runner() {
        Ok(()) if tools.task_runner_available() => println!("just installed"),
        Ok(()) => warn!("just was installed but is not on PATH yet; you may need to add ~/.local/bin"),
        Err(e) => warn!("Failed to install just: {e}"),
    }
    Ok(())
}

/// Drives one generation run.
pub struct Reconciler<'a> {
    config: &'a ProjectConfig,
    template_root: &'a Path,
    prompter: &'a dyn Prompter,
    tools: &'a dyn Toolchain,
    engine: &'a dyn TemplateRenderer,
    /// Overwrite an existing destination without asking.
    force: bool,
    /// Run dependency sync and hook install.
    env_setup: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        config: &'a ProjectConfig,
        template_root: &'a Path,
        prompter: &'a dyn Prompter,
        tools: &'a dyn Toolchain,
        engine: &'a dyn TemplateRenderer,
    ) -> Self {
        Self { config, template_root, prompter, tools, engine, force: false, env_setup: true }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn env_setup(mut self, env_setup: bool) -> Self {
        self.env_setup = env_setup;
        self
    }

    pub fn run(&self, workflow: &Workflow) -> Result<GenerationReport> {
        let unknown = unknown_tokens(self.template_root, &PlaceholderRenderer::new(self.config));
        for token in &unknown {
            warn!("Template uses {token}, which no configuration field provides");
        }

        let report = match workflow {
            Workflow::NewDirectory { target } => self.run_new_directory(target)?,
            Workflow::InPlace { root } => self.run_in_place(root)?,
        };

        if let Some(summary) = unresolved_summary(&report.unresolved) {
            warn!("{summary}");
        }
        Ok(report)
    }

    fn run_new_directory(&self, target: &Path) -> Result<GenerationReport> {
        if self.template_root.starts_with(target) {
            return Err(Error::ConfigError(format!(
                "output directory '{}' would contain the template itself",
                target.display()
            )));
        }

        if target.exists() {
            let question = format!("Directory '{}' already exists. Overwrite?", target.display());
            if !confirm(self.prompter, self.force, &question)? {
                return Err(Error::OutputDirectoryExistsError {
                    output_dir: target.display().to_string(),
                });
            }
            fs::remove_dir_all(target)?;
        }

        let summary = process_template_directory(self.template_root, target, self.config)?;
        self.write_context_doc(target);

        match self.tools.init_repository(target) {
            Ok(()) => println!("Git repository initialized with develop branch"),
            Err(e) => warn!("Git initialization failed: {e}"),
        }

        self.setup_environment(target);

        let removals = compute_removals(self.config, target);
        let removed = apply_removals(target, &removals);
        let unresolved = find_unresolved_placeholders(target)?;

        Ok(GenerationReport {
            project_dir: target.to_path_buf(),
            written: summary.written.len(),
            removed,
            unresolved,
        })
    }

    fn run_in_place(&self, root: &Path) -> Result<GenerationReport> {
        let scratch = TempDir::new()?;
        debug!("Staging rendered project in '{}'", scratch.path().display());

        let summary = process_template_directory(root, scratch.path(), self.config)?;
        self.write_context_doc(scratch.path());

        let removals = compute_removals(self.config, root);
        let removed = apply_removals(root, &removals);
        copy_tree(scratch.path(), root, &removals)?;

        if self.tools.has_repository(root) {
            println!("Keeping existing git history");
        } else {
            match self.tools.init_repository(root) {
                Ok(()) => println!("Git repository initialized with develop branch"),
                Err(e) => warn!("Git initialization failed: {e}"),
            }
        }

        self.setup_environment(root);

        let unresolved = find_unresolved_placeholders(root)?;
        Ok(GenerationReport {
            project_dir: root.to_path_buf(),
            written: summary.written.len(),
            removed,
            unresolved,
        })
    }

    fn write_context_doc(&self, dir: &Path) {
        match write_context_doc(self.engine, self.config, dir) {
            Ok(Some(path)) => debug!("Wrote '{}'", path.display()),
            Ok(None) => {}
            Err(e) => warn!("Could not write the context document: {e}"),
        }
    }

    fn setup_environment(&self, dir: &Path) {
        if !self.env_setup {
            return;
        }

        println!("Setting up development environment...");
        let extras: &[&str] = match self.config.project_type() {
            ProjectType::Data => &["dev", "data"],
            _ => &["dev"],
        };
        if let Err(e) = self.tools.sync_dependencies(dir, extras) {
            warn!("Development environment setup failed: {e}");
            println!("You can manually run 'just setup' or 'uv sync --extra dev' in the project directory");
            return;
        }

        if self.config.features().pre_commit {
            match self.tools.install_hooks(dir) {
                Ok(()) => println!("Pre-commit hooks installed"),
                Err(e) => warn!("Pre-commit installation skipped: {e}"),
            }
        }
        println!("Development environment ready");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_summary_truncates() {
        let files: Vec<PathBuf> = (0..7).map(|i| PathBuf::from(format!("f{i}.md"))).collect();
        let summary = unresolved_summary(&files).unwrap();

        assert!(summary.starts_with("Unresolved placeholders remain in 7 file(s):"));
        assert!(summary.contains("f4.md"));
        assert!(!summary.contains("f5.md"));
        assert!(summary.ends_with("... and 2 more"));
    }

    #[test]
    fn test_unresolved_summary_empty() {
        assert_eq!(unresolved_summary(&[]), None);
    }

    #[test]
    fn test_verify_globs() {
        let globs = verify_globs().unwrap();
        assert!(globs.is_match("README.md"));
        assert!(globs.is_match("src/pkg/__init__.py"));
        assert!(globs.is_match("justfile"));
        assert!(globs.is_match("docker/Dockerfile.dev"));
        assert!(!globs.is_match("assets/logo.png"));
    }
}
