//! Feature-driven file selection.
//!
//! Exclusions are matched as plain substrings of a template-relative path
//! (`/`-separated), so a fragment like `notebooks` also hits
//! `docs/notebooks-guide.md`. Keep it that way: templates rely on fragments
//! such as `.github` pruning whole directories.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ProjectConfig;
use crate::constants::{DOCS_DIR, GENERATOR_SCRIPT, TEMPLATE_MARKER};
use crate::placeholder::{contains_token, PlaceholderRenderer};
use crate::processor::{is_file_like, is_render_only, is_skipped_dir, slash_path};

const DOCKER_FILES: [&str; 3] = ["Dockerfile.dev", "Dockerfile.data", "docker-compose.yml"];
const PRE_COMMIT_FILES: [&str; 1] = [".pre-commit-config.yaml"];
const CI_FILES: [&str; 1] = [".github"];
const NOTEBOOK_FILES: [&str; 2] = ["notebooks", "Dockerfile.data"];
const SPARK_FILES: [&str; 2] = ["src/{{PROJECT_NAME}}/spark_utils.py", "scripts/setup_spark.py"];

/// Template scaffolding that never belongs in a generated project.
const BASE_REMOVALS: [&str; 6] = [
    GENERATOR_SCRIPT,
    "ROADMAP.md",
    "docs/GITHUB_LABELS.md",
    "docs/TEMPLATE_SETUP.md",
    TEMPLATE_MARKER,
    ".github/workflow-templates",
];

/// Path fragments skipped during the template walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    fragments: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.fragments.contains(fragment)
    }

    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(String::as_str)
    }

    /// Returns the first fragment occurring anywhere in `relative_path`.
    pub fn matching(&self, relative_path: &str) -> Option<&str> {
        self.fragments().find(|fragment| relative_path.contains(fragment))
    }

    fn extend(&mut self, fragments: &[&str]) {
        self.fragments.extend(fragments.iter().map(|f| f.to_string()));
    }
}

impl FromIterator<String> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self { fragments: iter.into_iter().collect() }
    }
}

/// Fragment groups gated on the negation of each feature flag.
fn disabled_feature_groups(config: &ProjectConfig) -> Vec<&'static [&'static str]> {
    let features = config.features();
    let mut groups: Vec<&'static [&'static str]> = Vec::new();
    if !features.docker {
        groups.push(&DOCKER_FILES);
    }
    if !features.pre_commit {
        groups.push(&PRE_COMMIT_FILES);
    }
    if !features.ci {
        groups.push(&CI_FILES);
    }
    if !features.notebooks {
        groups.push(&NOTEBOOK_FILES);
    }
    if !features.spark {
        groups.push(&SPARK_FILES);
    }
    groups
}

/// Computes the fragments to skip during the walk.
pub fn compute_exclusions(config: &ProjectConfig) -> ExclusionSet {
    let mut exclusions = ExclusionSet::default();
    for group in disabled_feature_groups(config) {
        exclusions.extend(group);
    }
    exclusions
}

/// Root-relative paths deleted after generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalList {
    paths: BTreeSet<PathBuf>,
}

impl RemovalList {
    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.paths.contains(path.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// True when `path` or one of its ancestors is slated for removal.
    pub fn covers(&self, path: &Path) -> bool {
        path.ancestors().any(|ancestor| self.paths.contains(ancestor))
    }

    fn insert(&mut self, path: impl Into<PathBuf>) {
        self.paths.insert(path.into());
    }
}

/// Computes the paths to delete from `project_root` after generation.
///
/// Besides the base scaffolding and the feature-gated groups (in both raw
/// and rendered spelling), raw template sources still present under the
/// root are listed: names carrying a placeholder token or the render-only
/// suffix, and files matched by an exclusion fragment. Those only exist when
/// generating in place. `.git` and `.venv` are never looked into. The docs
/// directory is added when every file inside it is already listed.
pub fn compute_removals(config: &ProjectConfig, project_root: &Path) -> RemovalList {
    let renderer = PlaceholderRenderer::new(config);
    let mut removals = RemovalList::default();

    for path in BASE_REMOVALS {
        removals.insert(path);
    }

    for group in disabled_feature_groups(config) {
        for path in group {
            removals.insert(*path);
            removals.insert(renderer.render(path));
        }
    }

    for path in template_sources(project_root, &compute_exclusions(config)) {
        removals.insert(path);
    }

    if docs_fully_removed(project_root, &removals) {
        removals.insert(DOCS_DIR);
    }

    removals
}

/// Paths under `root` that are still raw template input: names carrying a
/// token or the render-only suffix, and files an exclusion fragment matches.
///
/// Only the outermost such path is listed, since removing it removes its
/// children too.
fn template_sources(root: &Path, exclusions: &ExclusionSet) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    let mut walker =
        WalkDir::new(root).min_depth(1).into_iter().filter_entry(|entry| !is_skipped_dir(entry));

    while let Some(entry) = walker.next() {
        let Ok(entry) = entry else { continue };
        let Ok(relative) = entry.path().strip_prefix(root) else { continue };

        let name = entry.file_name().to_string_lossy();
        let is_file = is_file_like(&entry);
        let excluded = is_file
            && slash_path(relative).is_some_and(|path| exclusions.matching(&path).is_some());
        let is_raw = contains_token(&name) || (is_file && is_render_only(&name)) || excluded;
        if !is_raw {
            continue;
        }

        sources.push(relative.to_path_buf());
        if entry.file_type().is_dir() {
            walker.skip_current_dir();
        }
    }

    sources
}

fn docs_fully_removed(root: &Path, removals: &RemovalList) -> bool {
    let docs = root.join(DOCS_DIR);
    if !docs.is_dir() {
        return false;
    }

    WalkDir::new(&docs)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry))
        .filter_map(|entry| entry.ok())
        .filter(is_file_like)
        .all(|entry| {
            entry.path().strip_prefix(root).is_ok_and(|relative| removals.covers(relative))
        })
}
