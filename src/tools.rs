//! External tools: git, uv, just and pre-commit.
//!
//! Every call blocks, runs in an explicit working directory, captures its
//! output and is killed once its timeout elapses. A timeout counts as a
//! failed command.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use log::debug;
use wait_timeout::ChildExt;

use crate::constants::{
    DEVELOP_BRANCH, GIT_ADD_TIMEOUT, GIT_TIMEOUT, HOOK_INSTALL_TIMEOUT, INITIAL_COMMIT_MESSAGE,
    INSTALL_TIMEOUT, SYNC_TIMEOUT, VCS_DIR, VERSION_CHECK_TIMEOUT,
};
use crate::error::{Error, Result};

/// Captured result of a finished (or killed) command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: Option<i32>,
    pub success: bool,
    pub timed_out: bool,
    pub stdout: String,
    pub stderr: String,
}

fn describe<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut command = program.to_string();
    for arg in args {
        command.push(' ');
        command.push_str(&arg.as_ref().to_string_lossy());
    }
    command
}

fn read_back(mut file: File) -> Result<String> {
    let mut buf = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).trim_end().to_string())
}

/// Runs a command to completion or until `timeout` elapses.
///
/// Output goes to anonymous temp files rather than pipes so a chatty child
/// can never block on a full pipe while we wait on it.
///
/// # Errors
/// * `Error::CommandError` if the program cannot be spawned
pub fn run_command<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    cwd: &Path,
    timeout: Duration,
) -> Result<CommandOutput> {
    let command = describe(program, args);
    debug!("Running '{command}' in {}", cwd.display());

    let stdout = tempfile::tempfile()?;
    let stderr = tempfile::tempfile()?;

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout.try_clone()?))
        .stderr(Stdio::from(stderr.try_clone()?))
        .spawn()
        .map_err(|e| Error::CommandError { command: command.clone(), reason: e.to_string() })?;

    let (status, timed_out) = match child.wait_timeout(timeout)? {
        Some(status) => (status, false),
        None => {
            child.kill().ok();
            (child.wait()?, true)
        }
    };

    Ok(CommandOutput {
        status: status.code(),
        success: status.success() && !timed_out,
        timed_out,
        stdout: read_back(stdout)?,
        stderr: read_back(stderr)?,
    })
}

/// Like [`run_command`], but any failure becomes an error.
pub fn run_checked<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    cwd: &Path,
    timeout: Duration,
) -> Result<CommandOutput> {
    let output = run_command(program, args, cwd, timeout)?;
    if output.success {
        return Ok(output);
    }

    let reason = if output.timed_out {
        format!("timed out after {}s", timeout.as_secs())
    } else if output.stderr.is_empty() {
        format!("exit status {:?}", output.status)
    } else {
        output.stderr.clone()
    };
    Err(Error::CommandError { command: describe(program, args), reason })
}

/// Everything the generator asks of the outside world.
pub trait Toolchain {
    /// Reads a git configuration key; `None` on any failure.
    fn git_config(&self, key: &str) -> Option<String>;

    /// Fails with `MissingToolError` when the dependency manager is absent.
    fn ensure_dependency_manager(&self) -> Result<()>;

    fn task_runner_available(&self) -> bool;

    fn install_task_runner(&self) -> Result<()>;

    fn has_repository(&self, dir: &Path) -> bool {
        dir.join(VCS_DIR).exists()
    }

    /// init, add everything, commit, then switch to the develop branch.
    fn init_repository(&self, dir: &Path) -> Result<()>;

    fn sync_dependencies(&self, dir: &Path, extras: &[&str]) -> Result<()>;

    fn install_hooks(&self, dir: &Path) -> Result<()>;
}

/// Runs the real binaries found on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    /// Working directory for calls not tied to a project directory.
    cwd: PathBuf,
}

impl SystemToolchain {
    pub fn new<P: Into<PathBuf>>(cwd: P) -> Self {
        Self { cwd: cwd.into() }
    }
}

impl Toolchain for SystemToolchain {
    fn git_config(&self, key: &str) -> Option<String> {
        let output =
            run_command("git", &["config", "--get", key], &self.cwd, VERSION_CHECK_TIMEOUT).ok()?;
        (output.success && !output.stdout.trim().is_empty()).then(|| output.stdout.trim().to_string())
    }

    fn ensure_dependency_manager(&self) -> Result<()> {
        run_checked("uv", &["--version"], &self.cwd, VERSION_CHECK_TIMEOUT).map(|_| ()).map_err(|_| {
            Error::MissingToolError {
                tool: "uv".to_string(),
                hint: "uv is required for Python dependency management. Install it first: \
                       https://docs.astral.sh/uv/getting-started/installation/"
                    .to_string(),
            }
        })
    }

    fn task_runner_available(&self) -> bool {
        run_checked("just", &["--version"], &self.cwd, VERSION_CHECK_TIMEOUT).is_ok()
    }

    fn install_task_runner(&self) -> Result<()> {
        if cfg!(windows) {
            run_checked(
                "powershell",
                &["-Command", "irm https://just.systems/install.ps1 | iex"],
                &self.cwd,
                INSTALL_TIMEOUT,
            )?;
        } else {
            let home = std::env::var("HOME").map_err(|e| Error::ConfigError(e.to_string()))?;
            let install_dir = Path::new(&home).join(".local").join("bin");
            std::fs::create_dir_all(&install_dir)?;
            let script = format!(
                "curl --proto '=https' --tlsv1.2 -sSf https://just.systems/install.sh | bash -s -- --to {}",
                install_dir.display()
            );
            run_checked("bash", &["-c", script.as_str()], &self.cwd, INSTALL_TIMEOUT)?;
        }
        Ok(())
    }

    fn init_repository(&self, dir: &Path) -> Result<()> {
        run_checked("git", &["init"], dir, GIT_TIMEOUT)?;
        run_checked("git", &["add", "."], dir, GIT_ADD_TIMEOUT)?;
        run_checked("git", &["commit", "-m", INITIAL_COMMIT_MESSAGE], dir, GIT_TIMEOUT)?;
        run_checked("git", &["checkout", "-b", DEVELOP_BRANCH], dir, GIT_TIMEOUT)?;
        Ok(())
    }

    fn sync_dependencies(&self, dir: &Path, extras: &[&str]) -> Result<()> {
        let mut args = vec!["sync"];
        for extra in extras {
            args.extend(["--extra", *extra]);
        }
        run_checked("uv", &args, dir, SYNC_TIMEOUT).map(|_| ())
    }

    fn install_hooks(&self, dir: &Path) -> Result<()> {
        run_checked("uv", &["run", "pre-commit", "install"], dir, HOOK_INSTALL_TIMEOUT).map(|_| ())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_command_captures_output() {
        let dir = TempDir::new().unwrap();
        let output =
            run_command("sh", &["-c", "echo out; echo err >&2"], dir.path(), Duration::from_secs(10))
                .unwrap();

        assert!(output.success);
        assert_eq!(output.stdout, "out");
        assert_eq!(output.stderr, "err");
    }

    #[test]
    fn test_run_command_uses_cwd() {
        let dir = TempDir::new().unwrap();
        let output = run_command("pwd", &[] as &[&str], dir.path(), Duration::from_secs(10)).unwrap();
        let reported = PathBuf::from(output.stdout).canonicalize().unwrap();

        assert_eq!(reported, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_run_checked_nonzero_exit() {
        let dir = TempDir::new().unwrap();
        let result = run_checked("sh", &["-c", "exit 3"], dir.path(), Duration::from_secs(10));

        assert!(matches!(result, Err(Error::CommandError { .. })));
    }

    #[test]
    fn test_run_command_timeout() {
        let dir = TempDir::new().unwrap();
        let output =
            run_command("sleep", &["5"], dir.path(), Duration::from_millis(100)).unwrap();

        assert!(output.timed_out);
        assert!(!output.success);
    }

    #[test]
    fn test_missing_program() {
        let dir = TempDir::new().unwrap();
        let result =
            run_command("kiln-no-such-binary", &["--version"], dir.path(), Duration::from_secs(1));

        assert!(matches!(result, Err(Error::CommandError { .. })));
    }
}
