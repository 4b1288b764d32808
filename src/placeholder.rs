//! Placeholder substitution.
//!
//! Tokens look like `{{PROJECT_NAME}}` and are replaced by exact string
//! matching. Substituted values are never re-scanned.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use crate::config::ProjectConfig;
use crate::constants::{BINARY_EXTENSIONS, PLACEHOLDER_PATTERN};
use crate::error::Result;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Outcome of rendering one file in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRender {
    /// At least one token was replaced and the file rewritten.
    Rendered,
    /// Text file without any known token, left untouched.
    Unchanged,
    /// Extension is on the binary denylist.
    Binary,
    /// Content is not valid UTF-8, passed through as-is.
    NotText,
}

/// Wraps a configuration key into its placeholder token.
pub fn token_for(key: &str) -> String {
    format!("{{{{{}}}}}", key.to_uppercase())
}

/// Every `{{UPPER_SNAKE}}` token occurring in `text`.
pub fn find_tokens(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str())
}

pub fn contains_token(text: &str) -> bool {
    TOKEN_RE.is_match(text)
}

#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    /// token -> replacement
    replacements: IndexMap<String, String>,
}

impl PlaceholderRenderer {
    pub fn new(config: &ProjectConfig) -> Self {
        Self::from_values(config.placeholder_values())
    }

    /// Builds a renderer from lower snake case keys.
    pub fn from_values(values: IndexMap<String, String>) -> Self {
        let replacements = values.into_iter().map(|(key, value)| (token_for(&key), value)).collect();
        Self { replacements }
    }

    pub fn resolves(&self, token: &str) -> bool {
        self.replacements.contains_key(token)
    }

    /// Replaces every known token in one left-to-right pass.
    ///
    /// Unknown `{{...}}` sequences are kept verbatim.
    pub fn render(&self, text: &str) -> String {
        let mut rendered = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("{{") {
            rendered.push_str(&rest[..start]);
            rest = &rest[start..];

            let known = rest.find("}}").and_then(|end| {
                let token = &rest[..end + 2];
                self.replacements.get(token).map(|value| (token.len(), value))
            });

            match known {
                Some((len, value)) => {
                    rendered.push_str(value);
                    rest = &rest[len..];
                }
                None => {
                    rendered.push('{');
                    rest = &rest[1..];
                }
            }
        }

        rendered.push_str(rest);
        rendered
    }

    /// Renders a file's content in place.
    ///
    /// Binary extensions and undecodable content are left untouched. IO
    /// failures are returned so the caller can log and move on.
    pub fn render_file(&self, path: &Path) -> Result<FileRender> {
        if is_binary(path) {
            debug!("Skipping binary file {}", path.display());
            return Ok(FileRender::Binary);
        }

        let bytes = fs::read(path)?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(_) => {
                debug!("Passing through non UTF-8 file {}", path.display());
                return Ok(FileRender::NotText);
            }
        };

        let rendered = self.render(&content);
        if rendered == content {
            return Ok(FileRender::Unchanged);
        }

        fs::write(path, rendered)?;
        Ok(FileRender::Rendered)
    }
}

fn is_binary(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext))
}
