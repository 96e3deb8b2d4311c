//! Top-level subcommand orchestration.
pub mod add;
pub mod build;
pub mod completions;
pub mod env;
pub mod init;
pub mod publish;
pub mod remove;
pub mod upload;
pub mod version;
pub mod which;

use std::sync::Arc;

use anyhow::Result;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config::{Overrides, ProjectConfig};
use crate::error::ToolError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Logger;
use crate::platform::Platform;
use crate::tools::Toolchain;

/// Shared state for commands that operate on a project.
pub struct Context {
    /// Resolved manifest path, interpreter and settings.
    pub config: ProjectConfig,
    /// Logger for output and step recording.
    pub log: Arc<Logger>,
    /// Command executor (system processes, or a recorder in tests).
    pub executor: Arc<dyn Executor>,
    /// Global `--verbose`, forwarded to `build` and `twine`.
    pub verbose: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<Logger>")
            .field("executor", &self.executor)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Context {
    /// Resolve configuration for the current process and build a system
    /// executor whose search path starts with the venv's bin directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `[tool.psycho]` cannot be read.
    pub fn new(global: &GlobalOpts, verbose: bool, log: &Arc<Logger>) -> Result<Self> {
        let overrides = Overrides::from_env(global.python.clone());
        let config = ProjectConfig::load(&global.project_file, &overrides, Platform::detect())?;
        let executor: Arc<dyn Executor> = match config.venv_bin_dir() {
            Some(bin) if bin.is_dir() => {
                log.debug(&format!("searching {} first", bin.display()));
                Arc::new(SystemExecutor::with_path_prefix(bin))
            }
            _ => Arc::new(SystemExecutor::new()),
        };
        log.debug(&format!("manifest: {}", config.manifest_path.display()));
        log.debug(&format!("python: {}", config.python));
        let context = Self::with_executor(config, Arc::clone(log), executor, verbose);
        Ok(context)
    }

    /// Assemble a context from parts.
    #[must_use]
    pub fn with_executor(
        config: ProjectConfig,
        log: Arc<Logger>,
        executor: Arc<dyn Executor>,
        verbose: bool,
    ) -> Self {
        Self {
            config,
            log,
            executor,
            verbose,
        }
    }

    /// Toolchain running the resolved interpreter in the project directory.
    #[must_use]
    pub fn toolchain(&self) -> Toolchain<'_> {
        Toolchain::new(
            &self.config.python,
            &self.config.project_dir,
            self.executor.as_ref(),
        )
    }
}

/// Run the parsed command line.
///
/// # Errors
///
/// Returns the failing command's error.
pub fn dispatch(cli: &Cli, log: &Arc<Logger>) -> Result<()> {
    let context = || Context::new(&cli.global, cli.verbose, log);
    match &cli.command {
        Command::Add(opts) => add::run(&context()?, opts),
        Command::Remove(opts) => remove::run(&context()?, opts),
        Command::Build(opts) => build::run(&context()?, opts),
        Command::Publish(opts) => publish::run(&context()?, opts),
        Command::Upload(opts) => upload::run(&context()?, opts),
        Command::Init(opts) => init::run(&context()?, opts),
        Command::Env(opts) => env::run(&context()?, opts),
        Command::Which(opts) => which::run(&context()?, opts),
        Command::Completions(opts) => {
            completions::run(opts);
            Ok(())
        }
        Command::Version => {
            version::run();
            Ok(())
        }
    }
}

/// Process exit code for a failed command: the exit code of the external
/// tool that failed, or 1 for anything else.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|e| e.downcast_ref::<ToolError>().and_then(ToolError::exit_code))
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
