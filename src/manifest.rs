//! `pyproject.toml` access with format-preserving edits.
//!
//! The document is held as a [`toml_edit::DocumentMut`] so comments, key
//! order and unrelated tables survive a read-modify-write cycle. Container
//! shape is checked once here: a key holding the wrong type is a
//! [`ManifestError::Type`], never silently replaced.
use std::path::Path;

use toml_edit::{Array, DocumentMut, Item, Table, TableLike, Value};

use crate::error::ManifestError;

/// Key of the project metadata table.
pub const PROJECT: &str = "project";
/// Key of the required dependency array inside `[project]`.
pub const DEPENDENCIES: &str = "dependencies";
/// Key of the optional dependency group table inside `[project]`.
pub const OPTIONAL_DEPENDENCIES: &str = "optional-dependencies";

/// A parsed project manifest.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    doc: DocumentMut,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NotFound`] if the file is absent,
    /// [`ManifestError::Parse`] if it is not valid TOML, and
    /// [`ManifestError::Io`] for other read failures.
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ManifestError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ManifestError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::parse(path, &content)
    }

    /// Parse manifest text; `path` is only used for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] if `content` is not valid TOML.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { doc })
    }

    /// Serialize the document and overwrite `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        std::fs::write(path, self.doc.to_string()).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Wrap an existing document (used when scaffolding a new project).
    #[must_use]
    pub const fn from_document(doc: DocumentMut) -> Self {
        Self { doc }
    }

    /// Read-only access to the underlying document.
    #[must_use]
    pub const fn document(&self) -> &DocumentMut {
        &self.doc
    }

    /// Return the `[project]` table, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Type`] if `project` exists but is not a table.
    pub fn ensure_project_section(&mut self) -> Result<&mut Table, ManifestError> {
        let item = self
            .doc
            .entry(PROJECT)
            .or_insert_with(|| Item::Table(Table::new()));
        let found = item.type_name().to_string();
        item.as_table_mut().ok_or_else(|| ManifestError::Type {
            key: PROJECT.to_string(),
            expected: "a table",
            found,
        })
    }

    /// Return the `[project]` table if present.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Type`] if `project` exists but is not a table.
    pub fn project_section(&self) -> Result<Option<&Table>, ManifestError> {
        let Some(item) = self.doc.get(PROJECT) else {
            return Ok(None);
        };
        item.as_table().map(Some).ok_or_else(|| ManifestError::Type {
            key: PROJECT.to_string(),
            expected: "a table",
            found: item.type_name().to_string(),
        })
    }
}

/// Return `project.dependencies`, creating an empty array if absent.
///
/// # Errors
///
/// Returns [`ManifestError::Type`] if the key holds something other than an array.
pub fn ensure_dependency_list(project: &mut Table) -> Result<&mut Array, ManifestError> {
    let item = project
        .entry(DEPENDENCIES)
        .or_insert_with(|| Item::Value(Value::Array(Array::new())));
    let found = item.type_name().to_string();
    item.as_array_mut().ok_or_else(|| ManifestError::Type {
        key: format!("{PROJECT}.{DEPENDENCIES}"),
        expected: "an array",
        found,
    })
}

fn ensure_optional_table(project: &mut Table) -> Result<&mut dyn TableLike, ManifestError> {
    let item = project
        .entry(OPTIONAL_DEPENDENCIES)
        .or_insert_with(|| Item::Table(Table::new()));
    let found = item.type_name().to_string();
    item.as_table_like_mut().ok_or_else(|| ManifestError::Type {
        key: format!("{PROJECT}.{OPTIONAL_DEPENDENCIES}"),
        expected: "a table",
        found,
    })
}

/// Return `project.optional-dependencies.<group>`, creating the table and
/// group as needed.
///
/// # Errors
///
/// Returns [`ManifestError::Type`] if the table or group exists with the wrong shape.
pub fn ensure_optional_group<'a>(
    project: &'a mut Table,
    group: &str,
) -> Result<&'a mut Array, ManifestError> {
    let table = ensure_optional_table(project)?;
    if !table.contains_key(group) {
        table.insert(group, Item::Value(Value::Array(Array::new())));
    }
    let item = table
        .get_mut(group)
        .ok_or_else(|| ManifestError::Type {
            key: format!("{PROJECT}.{OPTIONAL_DEPENDENCIES}.{group}"),
            expected: "an array",
            found: "nothing".to_string(),
        })?;
    let found = item.type_name().to_string();
    item.as_array_mut().ok_or_else(|| ManifestError::Type {
        key: format!("{PROJECT}.{OPTIONAL_DEPENDENCIES}.{group}"),
        expected: "an array",
        found,
    })
}

/// Return `project.optional-dependencies.<group>` if it exists, without
/// creating anything.
///
/// # Errors
///
/// Returns [`ManifestError::Type`] if the table or group exists with the wrong shape.
pub fn optional_group<'a>(
    project: &'a mut Table,
    group: &str,
) -> Result<Option<&'a mut Array>, ManifestError> {
    let Some(item) = project.get_mut(OPTIONAL_DEPENDENCIES) else {
        return Ok(None);
    };
    let found = item.type_name().to_string();
    let table = item
        .as_table_like_mut()
        .ok_or_else(|| ManifestError::Type {
            key: format!("{PROJECT}.{OPTIONAL_DEPENDENCIES}"),
            expected: "a table",
            found,
        })?;
    let Some(item) = table.get_mut(group) else {
        return Ok(None);
    };
    let found = item.type_name().to_string();
    item.as_array_mut()
        .map(Some)
        .ok_or_else(|| ManifestError::Type {
            key: format!("{PROJECT}.{OPTIONAL_DEPENDENCIES}.{group}"),
            expected: "an array",
            found,
        })
}

/// Remove the optional group if it is empty, then the
/// `optional-dependencies` table if that left it empty.
///
/// Returns `true` if anything was removed.
pub fn prune_optional_group(project: &mut Table, group: &str) -> bool {
    let Some(table) = project
        .get_mut(OPTIONAL_DEPENDENCIES)
        .and_then(Item::as_table_like_mut)
    else {
        return false;
    };
    let group_empty = table
        .get(group)
        .and_then(Item::as_array)
        .is_some_and(Array::is_empty);
    if !group_empty {
        return false;
    }
    table.remove(group);
    if table.is_empty() {
        project.remove(OPTIONAL_DEPENDENCIES);
    }
    true
}

/// Collect the entries of a dependency array as strings.
///
/// # Errors
///
/// Returns [`ManifestError::Type`] if any element is not a string.
pub fn dependency_strings(array: &Array, key: &str) -> Result<Vec<String>, ManifestError> {
    array
        .iter()
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ManifestError::Type {
                    key: format!("{key}[]"),
                    expected: "a string",
                    found: value.type_name().to_string(),
                })
        })
        .collect()
}

/// Replace the contents of a dependency array, one entry per line.
///
/// An empty result renders as `[]`.
pub fn replace_entries<I, S>(array: &mut Array, entries: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    array.clear();
    for entry in entries {
        array.push_formatted(Value::from(entry.into()).decorated("\n    ", ""));
    }
    let multiline = !array.is_empty();
    array.set_trailing_comma(multiline);
    array.set_trailing(if multiline { "\n" } else { "" });
}
