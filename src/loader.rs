//! Template loading.
//! A template is either a local directory or a git repository cloned into
//! a temporary directory for the duration of the run.
use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

/// Represents the source location of a template.
#[derive(Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// Git repository URL (HTTPS or SSH)
    Git(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Git(repo) => write!(f, "git repository: '{repo}'"),
        }
    }
}

impl TemplateSource {
    /// Creates a TemplateSource from a string path or URL.
    pub fn from_string(s: &str) -> Self {
        if let Ok(url) = Url::parse(s) {
            if url.scheme() == "https" || url.scheme() == "git" {
                return Self::Git(s.to_string());
            }
        }

        // SSH shorthand, e.g. git@github.com:user/repo.git
        if s.starts_with("git@") {
            return Self::Git(s.to_string());
        }

        Self::FileSystem(PathBuf::from(s))
    }
}

/// A template ready on disk.
///
/// Keeps the temporary checkout of a git template alive until dropped.
#[derive(Debug)]
pub struct LoadedTemplate {
    root: PathBuf,
    checkout: Option<TempDir>,
}

impl LoadedTemplate {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when the template came from a remote repository.
    pub fn is_remote(&self) -> bool {
        self.checkout.is_some()
    }
}

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    fn load(&self) -> Result<LoadedTemplate>;
}

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// # Errors
    /// * `Error::TemplateDoesNotExistsError` if the path is not a directory
    fn load(&self) -> Result<LoadedTemplate> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: path.display().to_string(),
            });
        }

        Ok(LoadedTemplate { root: path.canonicalize()?, checkout: None })
    }
}

/// Loader for templates from git repositories.
pub struct GitLoader<S: AsRef<str>> {
    repo: S,
}

impl<S: AsRef<str>> GitLoader<S> {
    pub fn new(repo: S) -> Self {
        Self { repo }
    }
}

impl<S: AsRef<str>> TemplateLoader for GitLoader<S> {
    /// Clones the repository into a fresh temporary directory.
    ///
    /// # Errors
    /// * `Error::Git2Error` if the clone fails
    fn load(&self) -> Result<LoadedTemplate> {
        let repo_url = self.repo.as_ref();
        let checkout = TempDir::new()?;

        debug!("Cloning repository '{}' into '{}'.", repo_url, checkout.path().display());

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, _allowed_types| {
            let home = std::env::var("HOME").unwrap_or_default();
            git2::Cred::ssh_key(
                username_from_url.unwrap_or("git"),
                None,
                &Path::new(&home).join(".ssh").join("id_rsa"),
                None,
            )
        });

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_opts);
        builder.clone(repo_url, checkout.path()).map_err(Error::Git2Error)?;

        let root = checkout.path().canonicalize()?;
        Ok(LoadedTemplate { root, checkout: Some(checkout) })
    }
}

/// Returns the template directory for the given source string.
pub fn load_template(template: &str) -> Result<LoadedTemplate> {
    let source = TemplateSource::from_string(template);
    println!("Using template from the {source}");

    let loader: Box<dyn TemplateLoader> = match source {
        TemplateSource::Git(repo) => Box::new(GitLoader::new(repo)),
        TemplateSource::FileSystem(path) => Box::new(LocalLoader::new(path)),
    };

    loader.load()
}
