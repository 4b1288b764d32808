//! Common constants used throughout the kiln application.

use std::time::Duration;

/// Generator script sitting at the root of a template checkout
pub const GENERATOR_SCRIPT: &str = "setup_project.py";

/// Template repository marker config
pub const TEMPLATE_MARKER: &str = ".template.toml";

/// Package directory every template checkout carries under `src/`
pub const PLACEHOLDER_PACKAGE_DIR: &str = "src/{{PROJECT_NAME}}";

/// Files ending with this suffix are rendered and written without it
pub const RENDER_SUFFIX: &str = ".template";

/// Extensions that are copied byte-for-byte, never opened as text
pub const BINARY_EXTENSIONS: [&str; 5] = ["pyc", "pyo", "so", "dylib", "dll"];

/// Files scanned for leftover placeholders after generation
pub const VERIFY_PATTERNS: [&str; 14] = [
    "*.py", "*.md", "*.toml", "*.yml", "*.yaml", "*.txt", "*.cfg", "*.ini", "*.json", "*.sh",
    "*.ipynb", "**/justfile", "**/Dockerfile*", "**/.env*",
];

/// Regex matching an unresolved placeholder token
pub const PLACEHOLDER_PATTERN: &str = r"\{\{[A-Z_]+\}\}";

/// Version control metadata directory, never walked
pub const VCS_DIR: &str = ".git";

/// Virtual environment created by dependency sync
pub const VENV_DIR: &str = ".venv";

/// Directories no walk descends into: not rendered, copied, removed or scanned
pub const SKIP_DIRS: [&str; 2] = [VCS_DIR, VENV_DIR];

/// Documentation directory dropped when nothing in it survives cleanup
pub const DOCS_DIR: &str = "docs";

/// Generated context document
pub const CONTEXT_DOC: &str = "CLAUDE.md";

pub const DEVELOP_BRANCH: &str = "develop";
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial project setup";

pub const RESERVED_NAMES: [&str; 9] =
    ["test", "tests", "src", "lib", "bin", "tmp", "temp", "build", "dist"];

pub const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);
pub const GIT_TIMEOUT: Duration = Duration::from_secs(30);
pub const GIT_ADD_TIMEOUT: Duration = Duration::from_secs(60);
pub const HOOK_INSTALL_TIMEOUT: Duration = Duration::from_secs(60);
pub const SYNC_TIMEOUT: Duration = Duration::from_secs(300);
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);
