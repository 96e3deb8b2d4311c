//! Invocation of the Python packaging tools: `pip`, `build` and `twine`.
//!
//! Every tool runs as `<python> -m <module> ...` through an [`Executor`],
//! with one argv element per flag value so nothing passes through a shell.
mod build;
mod pip;
mod publish;
mod twine;

use std::path::{Path, PathBuf};

pub use build::{BuildOptions, ConfigSetting};
#[cfg(test)]
pub use pip::MockInstaller;
pub use pip::{InstallFlags, Installer, Pip};
pub use publish::{collect_artifacts, publish};
pub use twine::UploadOptions;

use crate::error::ToolError;
use crate::exec::Executor;

/// A Python interpreter plus the executor that runs it.
#[derive(Debug, Clone, Copy)]
pub struct Toolchain<'a> {
    python: &'a str,
    project_dir: &'a Path,
    executor: &'a dyn Executor,
}

impl<'a> Toolchain<'a> {
    /// Create a toolchain running `python` for the project in `project_dir`.
    #[must_use]
    pub const fn new(python: &'a str, project_dir: &'a Path, executor: &'a dyn Executor) -> Self {
        Self {
            python,
            project_dir,
            executor,
        }
    }

    /// The interpreter this toolchain runs.
    #[must_use]
    pub const fn python(&self) -> &'a str {
        self.python
    }

    /// The project directory builds and editable installs run in.
    #[must_use]
    pub const fn project_dir(&self) -> &'a Path {
        self.project_dir
    }

    /// A `pip` front end bound to this toolchain.
    #[must_use]
    pub const fn pip(&self) -> Pip<'a> {
        Pip::new(*self)
    }

    /// Run `python -m build` in the project directory.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] if the build cannot start or exits non-zero.
    pub fn build(&self, options: &BuildOptions) -> Result<(), ToolError> {
        self.module_in(self.project_dir, "build", &options.to_args())
    }

    /// Run `python -m twine upload` for `files`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] if twine cannot start or exits non-zero.
    pub fn upload(&self, options: &UploadOptions, files: &[PathBuf]) -> Result<(), ToolError> {
        let mut args = vec!["upload".to_string()];
        args.extend(options.to_args());
        args.extend(files.iter().map(|f| f.to_string_lossy().into_owned()));
        self.module("twine", &args)
    }

    pub(crate) fn module(&self, module: &str, args: &[String]) -> Result<(), ToolError> {
        let command_line = module_command(module, args);
        self.executor.run(self.python, &command_line).map(|_| ())
    }

    pub(crate) fn module_in(
        &self,
        dir: &Path,
        module: &str,
        args: &[String],
    ) -> Result<(), ToolError> {
        let command_line = module_command(module, args);
        self.executor
            .run_in(dir, self.python, &command_line)
            .map(|_| ())
    }
}

fn module_command<'s>(module: &'s str, args: &'s [String]) -> Vec<&'s str> {
    ["-m", module]
        .into_iter()
        .chain(args.iter().map(String::as_str))
        .collect()
}
