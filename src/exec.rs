//! Child process execution behind an injectable [`Executor`] seam.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::error::ToolError;

/// Result of a command execution.
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Captured standard output (empty when stdio was inherited).
    pub stdout: String,
    /// Captured standard error (empty when stdio was inherited).
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over child process execution.
///
/// [`SystemExecutor`] spawns real processes; tests substitute recording
/// implementations so argv construction can be asserted without running
/// `pip`, `build` or `twine`.
pub trait Executor: std::fmt::Debug + Send + Sync {
    /// Run a command with inherited stdio, failing on non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Spawn`] if the program cannot be started and
    /// [`ToolError::Failed`] if it exits non-zero.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult, ToolError>;

    /// Run a command in a specific directory with inherited stdio.
    ///
    /// # Errors
    ///
    /// Same as [`Executor::run`].
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult, ToolError>;

    /// Run a command capturing its output, without failing on non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Spawn`] if the program cannot be started.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult, ToolError>;

    /// Locate a program on the executor's search path.
    fn which(&self, program: &str) -> Option<PathBuf>;
}

/// Build a short label for error messages: the program plus its leading
/// arguments (enough to tell `python -m pip install` from `python -m build`).
fn label(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied().take(3))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Executes real child processes.
///
/// An optional path prefix (a virtual environment's bin directory) is
/// placed in front of `PATH` for the child and for program lookup. The
/// parent's environment is never modified.
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor {
    path_prefix: Option<PathBuf>,
}

impl SystemExecutor {
    /// Create an executor that uses the inherited `PATH` unchanged.
    #[must_use]
    pub const fn new() -> Self {
        Self { path_prefix: None }
    }

    /// Create an executor that searches `prefix` before the inherited `PATH`.
    #[must_use]
    pub fn with_path_prefix(prefix: impl Into<PathBuf>) -> Self {
        Self {
            path_prefix: Some(prefix.into()),
        }
    }

    /// The configured path prefix, if any.
    #[must_use]
    pub fn path_prefix(&self) -> Option<&Path> {
        self.path_prefix.as_deref()
    }

    /// The `PATH` value children should see, or `None` to inherit unchanged.
    fn search_path(&self) -> Option<OsString> {
        let prefix = self.path_prefix.as_ref()?;
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let paths = std::iter::once(prefix.clone()).chain(std::env::split_paths(&inherited));
        std::env::join_paths(paths).ok()
    }

    fn command(&self, program: &str) -> Command {
        let Some(path) = self.search_path() else {
            return Command::new(program);
        };
        let resolved = std::env::current_dir()
            .ok()
            .and_then(|cwd| which::which_in(program, Some(&path), cwd).ok())
            .map_or_else(|| OsString::from(program), PathBuf::into_os_string);
        let mut cmd = Command::new(resolved);
        cmd.env("PATH", path);
        cmd
    }

    fn execute_checked(mut cmd: Command, label: &str) -> Result<ExecResult, ToolError> {
        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ToolError::Spawn {
                program: label.to_string(),
                source,
            })?;
        if !status.success() {
            return Err(ToolError::Failed {
                program: label.to_string(),
                code: status.code(),
            });
        }
        Ok(ExecResult {
            success: true,
            code: status.code(),
            ..ExecResult::default()
        })
    }
}

impl Executor for SystemExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult, ToolError> {
        let mut cmd = self.command(program);
        cmd.args(args);
        Self::execute_checked(cmd, &label(program, args))
    }

    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult, ToolError> {
        let mut cmd = self.command(program);
        cmd.args(args).current_dir(dir);
        Self::execute_checked(cmd, &label(program, args))
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult, ToolError> {
        let output = self
            .command(program)
            .args(args)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: label(program, args),
                source,
            })?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        let Some(path) = self.search_path() else {
            return which::which(program).ok();
        };
        let cwd = std::env::current_dir().ok()?;
        which::which_in(program, Some(path), cwd).ok()
    }
}
