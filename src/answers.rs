//! Preloaded answers.
//!
//! A JSON or YAML object whose keys are configuration keys
//! (`project_name`, `use_docker`, ...). Any key found there is taken
//! instead of prompting.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug)]
pub enum AnswerSource<'a> {
    Stdin,
    File(&'a Path),
    None,
}

impl<'a> AnswerSource<'a> {
    /// `--stdin` wins over `--answers`.
    pub fn from_args(stdin: bool, file: Option<&'a Path>) -> Self {
        match (stdin, file) {
            (true, _) => Self::Stdin,
            (false, Some(path)) => Self::File(path),
            (false, None) => Self::None,
        }
    }
}

/// Parses answers text: JSON first, then YAML. Blank input means no answers.
pub fn parse_answers(content: &str) -> Result<serde_json::Value> {
    if content.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }

    let value: serde_json::Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::AnswersError(format!("answers are neither JSON nor YAML: {e}")))?,
    };

    match value {
        serde_json::Value::Object(_) | serde_json::Value::Null => Ok(value),
        other => Err(Error::AnswersError(format!("expected a mapping of answers, got {other}"))),
    }
}

pub fn load_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_answers(&buffer)
}

pub fn load_from_file(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::AnswersError(format!("cannot read answers file '{}': {e}", path.display()))
    })?;
    parse_answers(&content)
}

pub fn load_answers(source: AnswerSource<'_>) -> Result<serde_json::Value> {
    match source {
        AnswerSource::Stdin => load_from_stdin(),
        AnswerSource::File(path) => load_from_file(path),
        AnswerSource::None => Ok(serde_json::Value::Null),
    }
}

/// Looks up a preloaded answer and renders it as the text a user would type.
pub fn preloaded_text(answers: &serde_json::Value, key: &str) -> Option<String> {
    match answers.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
