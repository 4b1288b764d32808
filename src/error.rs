//! Error handling for the kiln application.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Custom error types for kiln operations.
///
/// Soft failures (a single unreadable file, a failed `git commit`) are logged
/// by the caller and never reach `main`; everything that does reach `main`
/// terminates the run with a nonzero status.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Represents errors that occur while processing a template tree
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Represents errors in command line arguments or generator settings
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Represents a value rejected by one of the input validators
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Represents a failure of the input provider itself (closed terminal, exhausted script)
    #[error("Prompt error: {0}")]
    PromptError(String),

    /// Raised when the operator declines to overwrite an existing destination
    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Template directory '{template_dir}' does not exist")]
    TemplateDoesNotExistsError { template_dir: String },

    /// Raised for a single file that could not be processed; logged and skipped
    #[error("Failed to process '{source_path}': {e}")]
    ProcessError { source_path: String, e: String },

    /// An external command exited unsuccessfully, timed out, or could not be spawned
    #[error("Command '{command}' failed: {reason}")]
    CommandError { command: String, reason: String },

    /// A tool the generated project cannot live without is not installed
    #[error("Missing required tool '{tool}'. {hint}")]
    MissingToolError { tool: String, hint: String },

    #[error("Answers error: {0}")]
    AnswersError(String),

    #[error("Template rendering error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Git error: {0}")]
    Git2Error(#[from] git2::Error),
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
