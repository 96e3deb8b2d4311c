//! Domain-specific error types for psycho.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors (e.g., [`ManifestError`],
//! [`ToolError`]) while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! PsychoError
//! ├── Manifest(ManifestError)       — pyproject.toml read/parse/shape/write
//! ├── Requirement(RequirementError) — malformed dependency specifiers
//! ├── Dependency(DependencyError)   — remove of an absent dependency/group
//! ├── Tool(ToolError)               — external tool spawn/exit failures
//! └── Init(InitError)               — project scaffolding
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for psycho.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum PsychoError {
    /// Manifest access error.
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Requirement parsing error.
    #[error("Requirement error: {0}")]
    Requirement(#[from] RequirementError),

    /// Dependency reconciliation error.
    #[error("Dependency error: {0}")]
    Dependency(#[from] DependencyError),

    /// External tool error.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Project initialization error.
    #[error("Init error: {0}")]
    Init(#[from] InitError),
}

impl PsychoError {
    /// Exit code of the external tool behind this error, if any.
    #[must_use]
    pub const fn tool_exit_code(&self) -> Option<i32> {
        match self {
            Self::Tool(e) => e.exit_code(),
            _ => None,
        }
    }
}

/// Errors that arise while reading, shaping, or writing the manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("Manifest not found: {}", .path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The manifest is not valid TOML.
    #[error("Invalid TOML in {}: {source}", .path.display())]
    Parse {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying parser error.
        source: toml_edit::TomlError,
    },

    /// A key exists with an incompatible shape.
    #[error("`{key}` must be {expected}, found {found}")]
    Type {
        /// Dotted key path (e.g. `project.dependencies`).
        key: String,
        /// Expected container type.
        expected: &'static str,
        /// Type name of the value actually present.
        found: String,
    },

    /// An I/O error occurred while reading or writing the manifest.
    #[error("IO error on manifest {}: {source}", .path.display())]
    Io {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from dependency specifier parsing.
#[derive(Error, Debug)]
pub enum RequirementError {
    /// The specifier is not a valid PEP 508 requirement.
    #[error("Invalid requirement specifier '{spec}': {message}")]
    InvalidSpecifier {
        /// The specifier as given.
        spec: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Errors that arise while reconciling dependency lists.
#[derive(Error, Debug)]
pub enum DependencyError {
    /// A remove was requested for a name that is not in the target list.
    #[error("Dependency '{name}' does not exist in {target}")]
    NotFound {
        /// Normalized package name.
        name: String,
        /// Human-readable target (e.g. `dependencies`, `optional group 'dev'`).
        target: String,
    },

    /// A remove targeted an optional group that does not exist.
    #[error("Optional dependency group '{group}' does not exist")]
    GroupNotFound {
        /// Group name.
        group: String,
    },
}

/// Errors that arise from invoking external tools.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The executable could not be started.
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The executable exited with a non-zero status.
    #[error("{program} failed (exit {})", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    Failed {
        /// Command label (program and leading arguments).
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// The build step produced nothing to upload.
    #[error("Build produced no artifacts in {}", .dir.display())]
    NoArtifacts {
        /// Output directory that was scanned.
        dir: PathBuf,
    },

    /// An I/O error occurred around a tool invocation (e.g. temp dirs).
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ToolError {
    /// Exit code to propagate to the calling shell, if this error carries one.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { code, .. } => match code {
                Some(c) => Some(*c),
                None => Some(1),
            },
            _ => None,
        }
    }
}

/// Errors that arise from project initialization.
#[derive(Error, Debug)]
pub enum InitError {
    /// The manifest already exists; init never overwrites it.
    #[error("File {} already exists", .path.display())]
    AlreadyExists {
        /// Manifest path.
        path: PathBuf,
    },

    /// An I/O error occurred while scaffolding.
    #[error("IO error creating {}: {source}", .path.display())]
    Io {
        /// Path being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ManifestError
    // -----------------------------------------------------------------------

    #[test]
    fn manifest_not_found_display() {
        let e = ManifestError::NotFound {
            path: PathBuf::from("pyproject.toml"),
        };
        assert_eq!(e.to_string(), "Manifest not found: pyproject.toml");
    }

    #[test]
    fn manifest_type_display() {
        let e = ManifestError::Type {
            key: "project.dependencies".to_string(),
            expected: "an array",
            found: "string".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "`project.dependencies` must be an array, found string"
        );
    }

    #[test]
    fn manifest_parse_has_source() {
        use std::error::Error as StdError;
        let source = "[project".parse::<toml_edit::DocumentMut>().unwrap_err();
        let e = ManifestError::Parse {
            path: PathBuf::from("pyproject.toml"),
            source,
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("Invalid TOML in pyproject.toml"));
    }

    #[test]
    fn manifest_io_display() {
        let e = ManifestError::Io {
            path: PathBuf::from("/ro/pyproject.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(e.to_string().contains("/ro/pyproject.toml"));
        assert!(e.to_string().contains("read-only"));
    }

    // -----------------------------------------------------------------------
    // RequirementError / DependencyError
    // -----------------------------------------------------------------------

    #[test]
    fn invalid_specifier_display() {
        let e = RequirementError::InvalidSpecifier {
            spec: ">=1.0".to_string(),
            message: "expected package name".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid requirement specifier '>=1.0': expected package name"
        );
    }

    #[test]
    fn dependency_not_found_display() {
        let e = DependencyError::NotFound {
            name: "requests".to_string(),
            target: "dependencies".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Dependency 'requests' does not exist in dependencies"
        );
    }

    #[test]
    fn group_not_found_display() {
        let e = DependencyError::GroupNotFound {
            group: "dev".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Optional dependency group 'dev' does not exist"
        );
    }

    // -----------------------------------------------------------------------
    // ToolError
    // -----------------------------------------------------------------------

    #[test]
    fn tool_failed_display_with_code() {
        let e = ToolError::Failed {
            program: "python -m pip".to_string(),
            code: Some(2),
        };
        assert_eq!(e.to_string(), "python -m pip failed (exit 2)");
        assert_eq!(e.exit_code(), Some(2));
    }

    #[test]
    fn tool_failed_by_signal_maps_to_one() {
        let e = ToolError::Failed {
            program: "python -m build".to_string(),
            code: None,
        };
        assert_eq!(e.to_string(), "python -m build failed (exit signal)");
        assert_eq!(e.exit_code(), Some(1));
    }

    #[test]
    fn no_artifacts_has_no_exit_code() {
        let e = ToolError::NoArtifacts {
            dir: PathBuf::from("/tmp/out"),
        };
        assert_eq!(e.exit_code(), None);
        assert_eq!(e.to_string(), "Build produced no artifacts in /tmp/out");
    }

    #[test]
    fn spawn_has_source() {
        use std::error::Error as StdError;
        let e = ToolError::Spawn {
            program: "python3".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.source().is_some());
    }

    // -----------------------------------------------------------------------
    // PsychoError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn psycho_error_from_tool_error_keeps_exit_code() {
        let e: PsychoError = ToolError::Failed {
            program: "twine".to_string(),
            code: Some(3),
        }
        .into();
        assert!(e.to_string().contains("Tool error"));
        assert_eq!(e.tool_exit_code(), Some(3));
    }

    #[test]
    fn psycho_error_from_manifest_error() {
        let e: PsychoError = ManifestError::NotFound {
            path: PathBuf::from("x.toml"),
        }
        .into();
        assert!(e.to_string().contains("Manifest error"));
        assert_eq!(e.tool_exit_code(), None);
    }

    #[test]
    fn psycho_error_from_init_error() {
        let e: PsychoError = InitError::AlreadyExists {
            path: PathBuf::from("pyproject.toml"),
        }
        .into();
        assert!(e.to_string().contains("already exists"));
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<PsychoError>();
        assert_send_sync::<ManifestError>();
        assert_send_sync::<RequirementError>();
        assert_send_sync::<DependencyError>();
        assert_send_sync::<ToolError>();
        assert_send_sync::<InitError>();
    }

    #[test]
    fn dependency_error_converts_to_anyhow() {
        let e = DependencyError::GroupNotFound {
            group: "docs".to_string(),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
