//! Options for `python -m build`.
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A `--config-setting NAME[=VALUE]` pair forwarded to the build backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSetting {
    /// Setting name.
    pub name: String,
    /// Setting value; `None` for a bare flag.
    pub value: Option<String>,
}

impl FromStr for ConfigSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (s, None),
        };
        if name.trim().is_empty() {
            return Err(format!("config setting '{s}' has an empty name"));
        }
        Ok(Self {
            name: name.to_string(),
            value,
        })
    }
}

impl fmt::Display for ConfigSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={value}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Flags for `python -m build`. Absent options produce no arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct BuildOptions {
    /// `--version`: print the build tool's version and exit.
    pub version: bool,
    /// `--verbose`.
    pub verbose: bool,
    /// `--sdist`.
    pub sdist: bool,
    /// `--wheel`.
    pub wheel: bool,
    /// `--skip-dependency-check`.
    pub skip_dependency_check: bool,
    /// `--no-isolation`.
    pub no_isolation: bool,
    /// `--config-setting`, repeatable.
    pub config_settings: Vec<ConfigSetting>,
    /// `--outdir`.
    pub outdir: Option<PathBuf>,
    /// `--installer` (e.g. `pip` or `uv`).
    pub installer: Option<String>,
}

impl BuildOptions {
    /// Argument list, one element per flag and per value.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        let switches = [
            (self.version, "--version"),
            (self.verbose, "--verbose"),
            (self.sdist, "--sdist"),
            (self.wheel, "--wheel"),
            (self.skip_dependency_check, "--skip-dependency-check"),
            (self.no_isolation, "--no-isolation"),
        ];
        args.extend(
            switches
                .into_iter()
                .filter(|(on, _)| *on)
                .map(|(_, flag)| flag.to_string()),
        );
        for setting in &self.config_settings {
            args.push("--config-setting".to_string());
            args.push(setting.to_string());
        }
        if let Some(outdir) = &self.outdir {
            args.push("--outdir".to_string());
            args.push(outdir.to_string_lossy().into_owned());
        }
        if let Some(installer) = &self.installer {
            args.push("--installer".to_string());
            args.push(installer.clone());
        }
        args
    }
}
