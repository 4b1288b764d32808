//! kiln turns a Python project template into a ready-to-use project.
//! It asks for the project's identity and features, renders `{{TOKEN}}`
//! placeholders in paths and file contents, drops unwanted feature files,
//! and prepares version control and the development environment.

/// Preloaded answers from JSON or YAML
pub mod answers;

/// Command-line interface
pub mod cli;

/// Question sequence producing the configuration record
pub mod collector;

/// The configuration record and its closed answer sets
pub mod config;

/// Fixed names, patterns and timeouts
pub mod constants;

/// The generated project context document (CLAUDE.md)
pub mod context_doc;

/// Error types and handling
pub mod error;

/// Template sources: local directories and git repositories
pub mod loader;

/// Logging setup for the env_logger backend
pub mod logger;

/// `{{TOKEN}}` substitution in paths and text files
pub mod placeholder;

/// Template tree walking and rendering
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// New-directory and in-place generation workflows
pub mod reconcile;

/// Jinja rendering for generated documents
pub mod renderer;

/// Feature-driven exclusions and post-generation removals
pub mod selector;

/// Subprocess execution and the external toolchain
pub mod tools;

/// Project name and email validation
pub mod validate;
