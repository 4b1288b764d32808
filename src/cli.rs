//! Command-line interface.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Where the generated project goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// In place when run from inside a template checkout, otherwise a new directory.
    Auto,
    /// Always create `<OUTPUT_DIR>/<project_name>`.
    NewDir,
    /// Transform the template checkout itself.
    InPlace,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "kiln: interactive Python project generator", long_about = None)]
pub struct Args {
    /// Path to the template directory or git repository URL
    #[arg(short, long, value_name = "TEMPLATE", default_value = ".")]
    pub template: String,

    /// Parent directory of the generated project (new-directory mode)
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Generation mode
    #[arg(short, long, value_enum, default_value_t = Mode::Auto)]
    pub mode: Mode,

    /// JSON or YAML file with preloaded answers
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdin")]
    pub answers: Option<PathBuf>,

    /// Read preloaded answers from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Overwrite an existing project directory without asking
    #[arg(short, long)]
    pub force: bool,

    /// Skip dependency installation and hook setup
    #[arg(long)]
    pub skip_env_setup: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments, exiting with clap's own message on error.
pub fn get_args() -> Args {
    Args::parse()
}
