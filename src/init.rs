//! Scaffolding for new projects: the manifest, `.gitignore` and the source
//! package directory.
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use toml_edit::{Array, DocumentMut, InlineTable, Item, Table, value};

use crate::error::InitError;
use crate::manifest::PROJECT;

const GITIGNORE: &str = include_str!("../templates/gitignore.txt");

/// Build backend written into every new manifest.
pub const BUILD_REQUIRES: &str = "setuptools>=61.0";
/// `build-system.build-backend` for new manifests.
pub const BUILD_BACKEND: &str = "setuptools.build_meta";

/// Metadata for a new `[project]` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// Distribution name.
    pub name: String,
    /// Initial version.
    pub version: String,
    /// One-line summary.
    pub description: Option<String>,
    /// Author name.
    pub author: Option<String>,
    /// Author email.
    pub email: Option<String>,
}

impl ProjectMetadata {
    /// Render `[project]` and `[build-system]` as a fresh document.
    #[must_use]
    pub fn to_document(&self) -> DocumentMut {
        let mut project = Table::new();
        project.insert("name", value(self.name.as_str()));
        project.insert("version", value(self.version.as_str()));
        if let Some(description) = &self.description {
            project.insert("description", value(description.as_str()));
        }
        if self.author.is_some() || self.email.is_some() {
            let mut person = InlineTable::new();
            if let Some(author) = &self.author {
                person.insert("name", author.as_str().into());
            }
            if let Some(email) = &self.email {
                person.insert("email", email.as_str().into());
            }
            let mut authors = Array::new();
            authors.push(person);
            project.insert("authors", value(authors));
        }

        let mut build_system = Table::new();
        build_system.insert("requires", value(Array::from_iter([BUILD_REQUIRES])));
        build_system.insert("build-backend", value(BUILD_BACKEND));

        let mut doc = DocumentMut::new();
        doc.insert(PROJECT, Item::Table(project));
        doc.insert("build-system", Item::Table(build_system));
        doc
    }
}

/// Write a new manifest. Never overwrites an existing file.
///
/// # Errors
///
/// Returns [`InitError::AlreadyExists`] if `path` exists, or
/// [`InitError::Io`] if it cannot be created.
pub fn write_manifest(path: &Path, metadata: &ProjectMetadata) -> Result<(), InitError> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                InitError::AlreadyExists {
                    path: path.to_path_buf(),
                }
            } else {
                InitError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
    file.write_all(metadata.to_document().to_string().as_bytes())
        .map_err(|source| InitError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the bundled `.gitignore` unless one already exists.
///
/// Returns `true` if the file was written.
///
/// # Errors
///
/// Returns [`InitError::Io`] if the file cannot be written.
pub fn write_gitignore(project_dir: &Path) -> Result<bool, InitError> {
    let path = project_dir.join(".gitignore");
    if path.exists() {
        return Ok(false);
    }
    fs::write(&path, GITIGNORE).map_err(|source| InitError::Io { path, source })?;
    Ok(true)
}

/// Import name for a distribution name: `-` and `.` become `_`.
#[must_use]
pub fn package_dir_name(name: &str) -> String {
    name.trim().replace(['-', '.'], "_")
}

/// Create `src/<package>/__init__.py`, keeping an existing file.
///
/// Returns the package directory.
///
/// # Errors
///
/// Returns [`InitError::Io`] if a directory or the file cannot be created.
pub fn create_package(project_dir: &Path, name: &str) -> Result<PathBuf, InitError> {
    let package_dir = project_dir.join("src").join(package_dir_name(name));
    fs::create_dir_all(&package_dir).map_err(|source| InitError::Io {
        path: package_dir.clone(),
        source,
    })?;
    let init_file = package_dir.join("__init__.py");
    if !init_file.exists() {
        fs::write(&init_file, "").map_err(|source| InitError::Io {
            path: init_file.clone(),
            source,
        })?;
    }
    Ok(package_dir)
}

/// Default project name: the final component of the project directory.
///
/// # Errors
///
/// Returns [`InitError::Io`] if the directory cannot be resolved.
pub fn default_project_name(project_dir: &Path) -> Result<String, InitError> {
    let resolved = project_dir.canonicalize().map_err(|source| InitError::Io {
        path: project_dir.to_path_buf(),
        source,
    })?;
    Ok(resolved
        .file_name()
        .map_or_else(|| "project".to_string(), |n| n.to_string_lossy().into_owned()))
}
