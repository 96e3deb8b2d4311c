//! The `[tool.psycho]` table of `pyproject.toml`.
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use super::toml_loader::load_config;
use crate::manifest::Manifest;

/// Settings read from `[tool.psycho]`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolSettings {
    /// Interpreter to run tools with.
    #[serde(default)]
    pub python: Option<String>,
    /// Virtual environment directory, relative to the project directory.
    #[serde(default)]
    pub venv: Option<PathBuf>,
    /// Default `--index-url` for installs.
    #[serde(default)]
    pub index_url: Option<String>,
    /// Default `--extra-index-url` for installs.
    #[serde(default)]
    pub extra_index_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: ToolTable,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    #[serde(default)]
    psycho: ToolSettings,
}

impl ToolSettings {
    /// Load settings from the manifest at `path`.
    ///
    /// A missing manifest or a manifest without `[tool.psycho]` yields the
    /// defaults. Other tables are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if `[tool.psycho]` holds a key of the wrong type. A syntax error
    /// surfaces as [`ManifestError::Parse`](crate::error::ManifestError::Parse).
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            Manifest::read(path)?;
        }
        let pyproject: PyProject = load_config(path)?;
        Ok(pyproject.tool.psycho)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ManifestError;

    fn write_manifest(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_manifest_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ToolSettings::load(&dir.path().join("pyproject.toml")).unwrap();
        assert_eq!(settings, ToolSettings::default());
    }

    #[test]
    fn manifest_without_tool_table_gives_defaults() {
        let (_dir, path) = write_manifest("[project]\nname = \"demo\"\ndependencies = []\n");
        assert_eq!(ToolSettings::load(&path).unwrap(), ToolSettings::default());
    }

    #[test]
    fn reads_kebab_case_keys() {
        let (_dir, path) = write_manifest(
            r#"[project]
name = "demo"

[tool.black]
line-length = 100

[tool.psycho]
python = "python3.12"
venv = "env"
index-url = "https://pypi.example/simple"
extra-index-url = "https://mirror.example/simple"
"#,
        );
        let settings = ToolSettings::load(&path).unwrap();
        assert_eq!(settings.python.as_deref(), Some("python3.12"));
        assert_eq!(settings.venv, Some(PathBuf::from("env")));
        assert_eq!(
            settings.index_url.as_deref(),
            Some("https://pypi.example/simple")
        );
        assert_eq!(
            settings.extra_index_url.as_deref(),
            Some("https://mirror.example/simple")
        );
    }

    #[test]
    fn wrong_type_is_an_error() {
        let (_dir, path) = write_manifest("[tool.psycho]\npython = 3\n");
        assert!(ToolSettings::load(&path).is_err());
    }

    #[test]
    fn malformed_manifest_is_a_parse_error() {
        let (_dir, path) = write_manifest("[project\nname = \"demo\"\n");
        let err = ToolSettings::load(&path).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<ManifestError>(),
                Some(ManifestError::Parse { .. })
            ),
            "got: {err:#}"
        );
    }
}
