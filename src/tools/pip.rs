//! `pip` installs and uninstalls behind the [`Installer`] seam.
use std::path::Path;

use super::Toolchain;
use crate::error::ToolError;
use crate::requirement::Requirement;

/// Flags that modify `pip install`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallFlags {
    /// `--pre`: allow pre-release versions.
    pub pre: bool,
    /// `--dry-run`: resolve without installing.
    pub dry_run: bool,
    /// `--upgrade`.
    pub upgrade: bool,
    /// `--index-url`.
    pub index_url: Option<String>,
    /// `--extra-index-url`.
    pub extra_index_url: Option<String>,
}

impl InstallFlags {
    /// Argument list for these flags, one element per flag and per value.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.pre {
            args.push("--pre".to_string());
        }
        if self.dry_run {
            args.push("--dry-run".to_string());
        }
        if self.upgrade {
            args.push("--upgrade".to_string());
        }
        if let Some(url) = &self.index_url {
            args.push("--index-url".to_string());
            args.push(url.clone());
        }
        if let Some(url) = &self.extra_index_url {
            args.push("--extra-index-url".to_string());
            args.push(url.clone());
        }
        args
    }
}

/// Installs and uninstalls packages in the active environment.
#[cfg_attr(test, mockall::automock)]
pub trait Installer {
    /// Install one requirement.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] if the installer fails.
    fn install(&self, requirement: &Requirement, flags: &InstallFlags) -> Result<(), ToolError>;

    /// Uninstall one requirement without prompting.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] if the installer fails.
    fn uninstall(&self, requirement: &Requirement) -> Result<(), ToolError>;

    /// Install the project itself in editable mode.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] if the installer fails.
    fn install_editable(&self, project_dir: &Path, flags: &InstallFlags) -> Result<(), ToolError>;
}

/// [`Installer`] backed by `python -m pip`.
#[derive(Debug, Clone, Copy)]
pub struct Pip<'a> {
    toolchain: Toolchain<'a>,
}

impl<'a> Pip<'a> {
    /// Bind `pip` to a toolchain.
    #[must_use]
    pub const fn new(toolchain: Toolchain<'a>) -> Self {
        Self { toolchain }
    }

    /// Run `pip install --upgrade pip`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] if pip fails.
    pub fn upgrade_self(&self) -> Result<(), ToolError> {
        let args = ["install", "--upgrade", "pip"].map(String::from);
        self.toolchain.module("pip", &args)
    }
}

impl Installer for Pip<'_> {
    fn install(&self, requirement: &Requirement, flags: &InstallFlags) -> Result<(), ToolError> {
        let mut args = vec!["install".to_string()];
        args.extend(flags.to_args());
        args.push(requirement.format());
        self.toolchain.module("pip", &args)
    }

    fn uninstall(&self, requirement: &Requirement) -> Result<(), ToolError> {
        let args = [
            "uninstall".to_string(),
            "-y".to_string(),
            requirement.name().to_string(),
        ];
        self.toolchain.module("pip", &args)
    }

    fn install_editable(&self, project_dir: &Path, flags: &InstallFlags) -> Result<(), ToolError> {
        let mut args = vec!["install".to_string()];
        args.extend(flags.to_args());
        args.push("--editable".to_string());
        args.push(".".to_string());
        self.toolchain.module_in(project_dir, "pip", &args)
    }
}
