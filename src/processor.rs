//! Template tree processing.
//!
//! Walks a template directory and writes the rendered project into an
//! output directory: excluded paths are skipped, path names and text file
//! contents go through placeholder substitution, and `.template` files lose
//! their suffix. Failures are per file; the walk itself always completes.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::ProjectConfig,
    constants::{RENDER_SUFFIX, SKIP_DIRS},
    error::{Error, Result},
    placeholder::{FileRender, PlaceholderRenderer},
    selector::{compute_exclusions, ExclusionSet},
};

/// Creates the output directory (and parents) when missing.
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    Ok(output_dir.to_path_buf())
}

/// Checks if a file name carries the render-only suffix.
pub fn is_render_only(file_name: &str) -> bool {
    file_name.len() > RENDER_SUFFIX.len() && file_name.ends_with(RENDER_SUFFIX)
}

/// Strips the render-only suffix from the last component of a relative path.
pub fn strip_render_suffix(relative_path: &str) -> &str {
    let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    if is_render_only(file_name) {
        &relative_path[..relative_path.len() - RENDER_SUFFIX.len()]
    } else {
        relative_path
    }
}

/// Validates a rendered relative path before it is joined onto the output root.
pub fn is_rendered_path_valid<S: AsRef<str>>(path: S) -> bool {
    let path = path.as_ref();
    !path.is_empty() && !path.starts_with('/') && !path.contains("//")
}

/// True for `.git` and `.venv` directories, which no walk descends into.
pub fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && SKIP_DIRS.iter().any(|skip| entry.file_name() == *skip)
}

/// Regular files, and symlinks that resolve to one.
pub fn is_file_like(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.file_type().is_symlink() && entry.path().is_file())
}

/// `/`-joined relative path, independent of the host separator.
pub(crate) fn slash_path(relative: &Path) -> Option<String> {
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    parts.map(|parts| parts.join("/"))
}

/// What happened to a single template entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// File lives under the output root.
    SkipOutput,
    /// Relative path contains an excluded fragment.
    SkipExcluded { fragment: String },
    Written { target: PathBuf, render: FileRender },
}

pub struct Processor<'a> {
    renderer: &'a PlaceholderRenderer,
    exclusions: &'a ExclusionSet,
    template_root: &'a Path,
    output_root: &'a Path,
}

impl<'a> Processor<'a> {
    pub fn new(
        renderer: &'a PlaceholderRenderer,
        exclusions: &'a ExclusionSet,
        template_root: &'a Path,
        output_root: &'a Path,
    ) -> Self {
        Self { renderer, exclusions, template_root, output_root }
    }

    /// Processes one template file.
    pub fn process(&self, template_entry: &Path) -> Result<FileAction> {
        if template_entry.starts_with(self.output_root) {
            return Ok(FileAction::SkipOutput);
        }

        let process_error = |e: String| Error::ProcessError {
            source_path: template_entry.display().to_string(),
            e,
        };

        let relative = template_entry
            .strip_prefix(self.template_root)
            .map_err(|e| process_error(e.to_string()))?;
        let relative = slash_path(relative)
            .ok_or_else(|| process_error("path is not valid UTF-8".to_string()))?;

        if let Some(fragment) = self.exclusions.matching(&relative) {
            debug!("Skipping '{relative}': matches excluded '{fragment}'");
            return Ok(FileAction::SkipExcluded { fragment: fragment.to_string() });
        }

        let rendered = self.renderer.render(strip_render_suffix(&relative));
        if !is_rendered_path_valid(&rendered) {
            return Err(process_error(format!("rendered path '{rendered}' is not valid")));
        }

        let target = self.output_root.join(&rendered);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| process_error(e.to_string()))?;
        }
        fs::copy(template_entry, &target).map_err(|e| process_error(e.to_string()))?;
        let render = self.renderer.render_file(&target).map_err(|e| process_error(e.to_string()))?;

        Ok(FileAction::Written { target, render })
    }
}

/// Summary of a finished walk.
#[derive(Debug, Default)]
pub struct WalkSummary {
    /// Output files written, in walk order.
    pub written: Vec<PathBuf>,
    pub excluded: usize,
    pub failed: usize,
}

/// Renders `template_root` into `output_root`.
///
/// The output root may live inside the template root; anything under it is
/// never read back. Version control metadata and virtual environments are
/// not part of the template. Symlinked files are copied as their target's
/// content.
pub fn process_template_directory(
    template_root: &Path,
    output_root: &Path,
    config: &ProjectConfig,
) -> Result<WalkSummary> {
    ensure_output_dir(output_root)?;
    let template_root = template_root.canonicalize()?;
    let output_root = output_root.canonicalize()?;

    let renderer = PlaceholderRenderer::new(config);
    let exclusions = compute_exclusions(config);
    let processor = Processor::new(&renderer, &exclusions, &template_root, &output_root);
    let mut summary = WalkSummary::default();

    let walker = WalkDir::new(&template_root).sort_by_file_name().into_iter().filter_entry(|entry| {
        entry.path() != output_root.as_path() && !is_skipped_dir(entry)
    });

    for dir_entry in walker {
        let entry = match dir_entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("{}", Error::TemplateError(e.to_string()));
                summary.failed += 1;
                continue;
            }
        };
        if !is_file_like(&entry) {
            continue;
        }

        match processor.process(entry.path()) {
            Ok(FileAction::Written { target, .. }) => {
                debug!("Rendered '{}'", target.display());
                summary.written.push(target);
            }
            Ok(FileAction::SkipExcluded { .. }) => summary.excluded += 1,
            Ok(FileAction::SkipOutput) => {}
            Err(e) => {
                warn!("{e}");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
