//! Resolution of the manifest location, virtual environment and interpreter.
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::settings::ToolSettings;
use crate::platform::Platform;

/// Directory that the manifest lives in; `.` for a bare file name.
#[must_use]
pub fn project_dir_of(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Interpreter and environment choices that outrank `[tool.psycho]`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--python` from the command line.
    pub python: Option<String>,
    /// `PSYCHO_PYTHON` from the environment.
    pub env_python: Option<String>,
    /// `VIRTUAL_ENV` from the environment (an activated venv).
    pub active_venv: Option<PathBuf>,
}

impl Overrides {
    /// Combine a command-line `--python` with the process environment.
    #[must_use]
    pub fn from_env(python: Option<String>) -> Self {
        Self {
            python,
            env_python: non_empty_var("PSYCHO_PYTHON"),
            active_venv: non_empty_var("VIRTUAL_ENV").map(PathBuf::from),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Fully resolved per-invocation configuration.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Path of `pyproject.toml`.
    pub manifest_path: PathBuf,
    /// Directory containing the manifest.
    pub project_dir: PathBuf,
    /// Interpreter used to run `pip`, `build` and `twine`.
    pub python: String,
    /// Virtual environment in use, if one was found.
    pub venv: Option<PathBuf>,
    /// Raw `[tool.psycho]` settings.
    pub settings: ToolSettings,
    /// Detected platform.
    pub platform: Platform,
}

impl ProjectConfig {
    /// Resolve configuration for the manifest at `manifest_path`, probing
    /// `PATH` for an interpreter when nothing more specific is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but its `[tool.psycho]`
    /// table cannot be read.
    pub fn load(manifest_path: &Path, overrides: &Overrides, platform: Platform) -> Result<Self> {
        Self::load_with(manifest_path, overrides, platform, |name| {
            which::which(name).ok()
        })
    }

    /// Like [`ProjectConfig::load`] with an explicit `PATH` lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ProjectConfig::load`].
    pub fn load_with(
        manifest_path: &Path,
        overrides: &Overrides,
        platform: Platform,
        lookup: impl Fn(&str) -> Option<PathBuf>,
    ) -> Result<Self> {
        let project_dir = project_dir_of(manifest_path);
        let settings = ToolSettings::load(manifest_path)?;
        let venv = resolve_venv(&project_dir, &settings, overrides);
        let python = resolve_python(&settings, overrides, venv.as_deref(), platform, lookup);
        Ok(Self {
            manifest_path: manifest_path.to_path_buf(),
            project_dir,
            python,
            venv,
            settings,
            platform,
        })
    }

    /// Executable directory of the virtual environment, searched before
    /// `PATH` by child processes.
    #[must_use]
    pub fn venv_bin_dir(&self) -> Option<PathBuf> {
        self.venv
            .as_deref()
            .map(|venv| self.platform.venv_bin_dir(venv))
    }
}

/// Pick the virtual environment: configured, then activated, then
/// `<project>/.venv` when it exists.
fn resolve_venv(
    project_dir: &Path,
    settings: &ToolSettings,
    overrides: &Overrides,
) -> Option<PathBuf> {
    if let Some(configured) = &settings.venv {
        return Some(project_dir.join(configured));
    }
    if let Some(active) = &overrides.active_venv {
        return Some(active.clone());
    }
    let local = project_dir.join(".venv");
    local.is_dir().then_some(local)
}

/// Pick the interpreter: `--python`, `PSYCHO_PYTHON`, `[tool.psycho] python`,
/// the venv interpreter, then the first platform candidate on `PATH`.
fn resolve_python(
    settings: &ToolSettings,
    overrides: &Overrides,
    venv: Option<&Path>,
    platform: Platform,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> String {
    if let Some(explicit) = overrides
        .python
        .as_ref()
        .or(overrides.env_python.as_ref())
        .or(settings.python.as_ref())
    {
        return explicit.clone();
    }
    if let Some(venv) = venv {
        let interpreter = platform.venv_python(venv);
        if interpreter.is_file() {
            return interpreter.to_string_lossy().into_owned();
        }
    }
    let candidates = platform.python_candidates();
    candidates
        .iter()
        .find(|name| lookup(name).is_some())
        .or_else(|| candidates.first())
        .map_or_else(|| "python".to_string(), |name| (*name).to_string())
}
