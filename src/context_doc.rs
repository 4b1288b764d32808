//! The generated project context document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::constants::CONTEXT_DOC;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

const CONTEXT_DOC_TEMPLATE: &str = r#"# {{ project_name }} - Claude Context

## Project Overview

**Name**: {{ project_name }}
**Description**: {{ project_description }}
**Type**: {{ project_type }}
**Author**: {{ author_name }} ({{ author_email }})
**License**: {{ license }}

## Technical Details

- **Python Version**: {{ min_python_version }}+
- **Package Manager**: uv
- **Testing**: pytest with coverage
- **Linting**: ruff (replaces black, isort, flake8)
- **Type Checking**: mypy
- **Security**: safety, bandit
- **Automation**: nox for multi-environment testing

## Project Structure

```
{{ project_name }}/
├── src/{{ python_package_name }}/     # Source code
├── tests/                                 # Test files
├── pyproject.toml                        # Project configuration
├── noxfile.py                            # Automation tasks
├── justfile                              # Development commands
└── README.md                             # Documentation
```

## Development Workflow

### Setup
```bash
# Install dependencies
uv sync --extra dev
{% if use_pre_commit %}

# Setup pre-commit hooks
pre-commit install
{% endif %}
```

### Testing
```bash
# Run tests
just test
# or: uv run pytest

# Test with coverage
just test-cov

# Test all Python versions
just test-all
# or: nox -s tests
```

### Code Quality
```bash
# Format code
just format

# Lint code
just lint

# Type check
just type-check

# All quality checks
just qa
```

### Automation
```bash
# Full CI pipeline
just ci
# or: nox -s ci

# Individual nox sessions
nox -s tests        # Run tests
nox -s lint         # Lint code
nox -s type_check   # Type checking
nox -s safety       # Security check
```

{% if use_docker %}
### Docker Development
```bash
# Start development environment
just docker-dev
# or: nox -s docker_dev

# Access development shell
just docker-shell

# Stop services
just docker-down
```

{% endif %}
{% if use_jupyter %}
### Jupyter Notebooks
```bash
# Start Jupyter Lab locally
just jupyter
# or: nox -s jupyter

# Start Jupyter in Docker
just docker-jupyter

# Check notebook code quality
nox -s data_quality
```

{% endif %}
{% if use_spark %}
### PySpark
```bash
# Setup Spark environment
nox -s spark_setup
```

```python
from {{ python_package_name }}.spark_utils import get_local_spark_session

spark = get_local_spark_session()
# ... your Spark code ...
spark.stop()
```

{% endif %}
## Key Commands

- `just setup` - Setup development environment
- `just test` - Run tests
- `just ci` - Run full CI pipeline
- `just format` - Format and fix code
- `just clean` - Clean build artifacts
- `just info` - Show project information

## Notes for Claude

- This project uses **uv** for dependency management (faster than pip/poetry)
- **ruff** handles all code formatting and linting (replaces black+isort+flake8)
- **nox** provides automation across multiple Python versions
- **justfile** provides convenient development commands
- All tools are configured in `pyproject.toml`

When helping with this project:
1. Use the existing tools and configurations
2. Follow the established patterns in the codebase
3. Add tests for new functionality
4. Update documentation as needed
5. Run `just ci` before committing changes
{% if project_type == "data" %}

## Data Project Specifics

**Data Sources**: {{ data_sources if data_sources else "Not specified" }}

- Data files go in `data/` with subdirectories for raw/processed/external
- Notebooks go in `notebooks/` for exploration and analysis
- Use the data utilities in `src/{{ python_package_name }}/data_utils.py`
{% if use_spark %}
- Spark utilities available in `src/{{ python_package_name }}/spark_utils.py`
{% endif %}
{% endif %}
"#;

/// Renders the context document for `config`.
pub fn render_context_doc(engine: &dyn TemplateRenderer, config: &ProjectConfig) -> Result<String> {
    let context = serde_json::to_value(config)
        .map_err(|e| Error::TemplateError(format!("cannot build document context: {e}")))?;
    engine.render(CONTEXT_DOC_TEMPLATE, &context)
}

/// Writes the context document into `project_dir` when the feature is on.
///
/// # Returns
/// * `Ok(Some(path))` - document written
/// * `Ok(None)` - feature disabled
pub fn write_context_doc(
    engine: &dyn TemplateRenderer,
    config: &ProjectConfig,
    project_dir: &Path,
) -> Result<Option<PathBuf>> {
    if !config.features().context_doc {
        return Ok(None);
    }

    let content = render_context_doc(engine, config)?;
    let path = project_dir.join(CONTEXT_DOC);
    fs::write(&path, content)?;
    Ok(Some(path))
}
