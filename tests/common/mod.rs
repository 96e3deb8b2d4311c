// Shared helpers for integration tests.
//
// Provides a temporary project directory with a `pyproject.toml`, a fake
// executor that records every command instead of spawning it, and a way to
// assemble a command `Context` from the two.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use psycho_cli::commands::Context;
use psycho_cli::config::{Overrides, ProjectConfig};
use psycho_cli::error::ToolError;
use psycho_cli::exec::{ExecResult, Executor};
use psycho_cli::logging::Logger;
use psycho_cli::platform::Platform;

/// Interpreter name every test context resolves to.
pub const PYTHON: &str = "python3";

/// Minimal manifest with an empty dependency list.
pub const MINIMAL_MANIFEST: &str = concat!(
    "[project]\n",
    "name = \"demo\"\n",
    "version = \"0.1.0\"\n",
    "dependencies = []\n",
);

/// One command the fake executor was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Working directory for `run_in`, `None` otherwise.
    pub dir: Option<PathBuf>,
    /// Program name.
    pub program: String,
    /// Arguments, one element each.
    pub args: Vec<String>,
}

impl Call {
    /// The call as a single space-joined line.
    pub fn line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Value following `flag` in the argument list.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        let pos = self.args.iter().position(|a| a == flag)?;
        self.args.get(pos + 1).map(String::as_str)
    }
}

/// Records commands instead of running them.
///
/// Optionally fails any call whose arguments contain a given word, writes
/// fake distributions into `--outdir` when a build runs, and reports a set
/// of programs as present on the search path.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    calls: Mutex<Vec<Call>>,
    fail_on: Option<(String, i32)>,
    artifacts: Vec<String>,
    programs: Vec<String>,
}

impl FakeExecutor {
    /// An executor where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail calls whose arguments contain `word` with exit code `code`.
    pub fn failing_on(mut self, word: &str, code: i32) -> Self {
        self.fail_on = Some((word.to_string(), code));
        self
    }

    /// Files a build writes into its output directory.
    pub fn with_artifacts(mut self, names: &[&str]) -> Self {
        self.artifacts = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    /// Programs that `which` reports as found.
    pub fn with_programs(mut self, names: &[&str]) -> Self {
        self.programs = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every recorded call as a line.
    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(Call::line).collect()
    }

    fn record(
        &self,
        dir: Option<&Path>,
        program: &str,
        args: &[&str],
    ) -> Result<ExecResult, ToolError> {
        let call = Call {
            dir: dir.map(Path::to_path_buf),
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        };
        if let Some((word, code)) = &self.fail_on
            && args.contains(&word.as_str())
        {
            let line = call.line();
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(call);
            return Err(ToolError::Failed {
                program: line,
                code: Some(*code),
            });
        }
        if args.get(1) == Some(&"build")
            && let Some(outdir) = call.flag_value("--outdir")
        {
            for name in &self.artifacts {
                std::fs::write(Path::new(outdir).join(name), b"dist").expect("write artifact");
            }
        }
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        Ok(ExecResult {
            success: true,
            code: Some(0),
            ..ExecResult::default()
        })
    }
}

impl Executor for FakeExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult, ToolError> {
        self.record(None, program, args)
    }

    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult, ToolError> {
        self.record(Some(dir), program, args)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult, ToolError> {
        self.record(None, program, args)
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        self.programs
            .iter()
            .any(|p| p == program)
            .then(|| PathBuf::from("/usr/bin").join(program))
    }
}

/// An isolated project directory backed by a [`tempfile::TempDir`].
#[derive(Debug)]
pub struct TestProject {
    /// Temporary directory holding the project.
    pub root: tempfile::TempDir,
}

impl TestProject {
    /// An empty project directory with no manifest.
    pub fn empty() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// A project whose `pyproject.toml` holds `manifest`.
    pub fn with_manifest(manifest: &str) -> Self {
        let project = Self::empty();
        std::fs::write(project.manifest_path(), manifest).expect("write manifest");
        project
    }

    /// A project with [`MINIMAL_MANIFEST`].
    pub fn minimal() -> Self {
        Self::with_manifest(MINIMAL_MANIFEST)
    }

    /// Project directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of `pyproject.toml`.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.path().join("pyproject.toml")
    }

    /// Current manifest text.
    pub fn manifest(&self) -> String {
        std::fs::read_to_string(self.manifest_path()).expect("read manifest")
    }

    /// Current manifest parsed as plain TOML.
    pub fn manifest_value(&self) -> toml::Value {
        self.manifest().parse().expect("parse manifest")
    }

    /// Entries of `[project] dependencies`.
    pub fn dependencies(&self) -> Vec<String> {
        strings(self.manifest_value().get("project").and_then(|p| p.get("dependencies")))
    }

    /// Entries of `[project.optional-dependencies] <group>`.
    pub fn optional(&self, group: &str) -> Vec<String> {
        strings(
            self.manifest_value()
                .get("project")
                .and_then(|p| p.get("optional-dependencies"))
                .and_then(|o| o.get(group)),
        )
    }

    /// A command context for this project running through `executor`.
    pub fn context(&self, executor: &Arc<FakeExecutor>) -> Context {
        let overrides = Overrides {
            python: Some(PYTHON.to_string()),
            ..Overrides::default()
        };
        let config = self.config(&overrides).expect("load project config");
        let executor: Arc<dyn Executor> = Arc::clone(executor) as Arc<dyn Executor>;
        let log = Arc::new(Logger::without_log_file());
        Context::with_executor(config, log, executor, false)
    }

    /// Load the project configuration the way command dispatch does.
    pub fn config(&self, overrides: &Overrides) -> anyhow::Result<ProjectConfig> {
        ProjectConfig::load_with(
            &self.manifest_path(),
            overrides,
            Platform::detect(),
            |_| None,
        )
    }
}

fn strings(value: Option<&toml::Value>) -> Vec<String> {
    value
        .and_then(toml::Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(toml::Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
