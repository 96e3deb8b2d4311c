//! PEP 508 dependency specifiers.
//!
//! A [`Requirement`] wraps a parsed `pep508_rs` requirement and caches its
//! normalized package name, which is the identity key used when reconciling
//! dependency lists: `Requests>=2` and `requests<3` are the same dependency.
use std::fmt;
use std::str::FromStr;

use crate::error::RequirementError;

/// A parsed dependency specifier: package name plus optional extras,
/// version constraints and environment marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    inner: pep508_rs::Requirement,
    name: String,
}

impl Requirement {
    /// Parse a specifier such as `requests>=2.0` or `flask[async]; python_version >= "3.9"`.
    ///
    /// # Errors
    ///
    /// Returns [`RequirementError::InvalidSpecifier`] on empty or malformed input.
    pub fn parse(spec: &str) -> Result<Self, RequirementError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(RequirementError::InvalidSpecifier {
                spec: spec.to_string(),
                message: "empty specifier".to_string(),
            });
        }
        let inner = pep508_rs::Requirement::from_str(trimmed).map_err(|e| {
            RequirementError::InvalidSpecifier {
                spec: spec.to_string(),
                message: e.to_string().trim().to_string(),
            }
        })?;
        let name = inner.name.to_string();
        Ok(Self { inner, name })
    }

    /// Normalized package name (lowercase, separators collapsed to `-`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical string form, suitable for writing back to the manifest.
    #[must_use]
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Whether `other` names the same package, regardless of constraints.
    #[must_use]
    pub fn same_dependency(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl FromStr for Requirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Normalize a distribution name per PEP 503.
///
/// Lowercases and collapses every run of `-`, `_` and `.` into a single `-`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
                in_separator = true;
            }
        } else {
            out.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    out
}
