//! Reconciling `pyproject.toml` dependency lists with the environment.
//!
//! `add` and `remove` keep the manifest and the installed packages in step:
//! every package is installed (or uninstalled) before the manifest changes,
//! and the manifest is written once, after the whole batch has succeeded.
use std::fmt;
use std::path::Path;

use crate::config::project_dir_of;
use crate::error::{DependencyError, ManifestError, PsychoError};
use crate::logging::{Log, StepStatus};
use crate::manifest::{
    self, DEPENDENCIES, Manifest, OPTIONAL_DEPENDENCIES, PROJECT, dependency_strings,
    replace_entries,
};
use crate::requirement::{Requirement, normalize_name};
use crate::tools::{InstallFlags, Installer};

/// Which dependency list an operation targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DependencyTarget {
    /// `project.dependencies`.
    #[default]
    Required,
    /// `project.optional-dependencies.<group>`.
    Optional(String),
}

impl DependencyTarget {
    /// Target for an optional `--optional GROUP` flag.
    #[must_use]
    pub fn from_group(group: Option<&str>) -> Self {
        group.map_or(Self::Required, |g| Self::Optional(g.to_string()))
    }

    /// Dotted manifest key of the target list.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Required => format!("{PROJECT}.{DEPENDENCIES}"),
            Self::Optional(group) => format!("{PROJECT}.{OPTIONAL_DEPENDENCIES}.{group}"),
        }
    }
}

impl fmt::Display for DependencyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "dependencies"),
            Self::Optional(group) => write!(f, "optional group '{group}'"),
        }
    }
}

/// Insertion-ordered set of requirements, unique by normalized name.
///
/// Entries read from the manifest keep their original text; entries
/// inserted afterwards are written in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    requirement: Requirement,
    text: String,
}

impl RequirementSet {
    /// Empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a list of specifiers, keeping each one's text as written. A
    /// later duplicate replaces an earlier one in place.
    ///
    /// # Errors
    ///
    /// Returns the first [`RequirementError`](crate::error::RequirementError)
    /// encountered.
    pub fn from_specs<I, S>(specs: I) -> Result<Self, PsychoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for spec in specs {
            let text = spec.as_ref().trim();
            set.put(Requirement::parse(text)?, text.to_string());
        }
        Ok(set)
    }

    /// Look up an entry by (unnormalized) package name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Requirement> {
        let name = normalize_name(name);
        self.iter().find(|r| r.name() == name)
    }

    /// Whether an entry with this package name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert a requirement, replacing an entry with the same name in place.
    /// Returns the replaced entry.
    pub fn insert(&mut self, requirement: Requirement) -> Option<Requirement> {
        let text = requirement.format();
        self.put(requirement, text)
    }

    fn put(&mut self, requirement: Requirement, text: String) -> Option<Requirement> {
        let entry = Entry { requirement, text };
        let existing = self
            .entries
            .iter_mut()
            .find(|e| e.requirement.same_dependency(&entry.requirement));
        if let Some(slot) = existing {
            return Some(std::mem::replace(slot, entry).requirement);
        }
        self.entries.push(entry);
        None
    }

    /// Remove the entry with this package name.
    pub fn remove(&mut self, name: &str) -> Option<Requirement> {
        let name = normalize_name(name);
        let index = self.iter().position(|r| r.name() == name)?;
        Some(self.entries.remove(index).requirement)
    }

    /// Entries in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.iter().map(|e| &e.requirement)
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Manifest text of every entry, in order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text.clone()).collect()
    }
}

/// An `add` request.
#[derive(Debug, Clone)]
pub struct AddRequest<'a> {
    /// Path of `pyproject.toml`.
    pub manifest_path: &'a Path,
    /// Specifiers to add; empty means "install the project itself".
    pub packages: &'a [String],
    /// List to add to.
    pub target: DependencyTarget,
    /// Flags forwarded to the installer.
    pub flags: InstallFlags,
}

/// What an `add` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// No packages were named; the project was installed in editable mode.
    Editable,
    /// Packages were installed and recorded.
    Updated {
        /// Specifiers that were new to the list.
        added: Vec<String>,
        /// Specifiers that replaced an existing entry of the same name.
        replaced: Vec<String>,
        /// Whether the manifest was written (false on dry runs).
        written: bool,
    },
}

/// A `remove` request.
#[derive(Debug, Clone)]
pub struct RemoveRequest<'a> {
    /// Path of `pyproject.toml`.
    pub manifest_path: &'a Path,
    /// Package names or specifiers to remove.
    pub packages: &'a [String],
    /// List to remove from.
    pub target: DependencyTarget,
}

fn parse_all(packages: &[String]) -> Result<Vec<Requirement>, PsychoError> {
    packages
        .iter()
        .map(|p| Requirement::parse(p).map_err(PsychoError::from))
        .collect()
}

fn load_set(
    array: &toml_edit::Array,
    target: &DependencyTarget,
) -> Result<RequirementSet, PsychoError> {
    RequirementSet::from_specs(dependency_strings(array, &target.key())?)
}

/// Install packages and record them in the target list.
///
/// Every specifier is parsed before anything runs. For each package an
/// existing entry of the same name is uninstalled first, then the new one
/// is installed and takes the old entry's position. With no packages the
/// project itself is installed in editable mode and the manifest is left
/// alone.
///
/// # Errors
///
/// Returns the first parse, manifest or installer failure. Nothing is
/// written to the manifest unless every install succeeded.
pub fn add_packages(
    request: &AddRequest<'_>,
    installer: &dyn Installer,
    log: &dyn Log,
) -> Result<AddOutcome, PsychoError> {
    if request.packages.is_empty() {
        let project_dir = project_dir_of(request.manifest_path);
        log.stage("Installing project in editable mode");
        installer.install_editable(&project_dir, &request.flags)?;
        log.record_step("editable install", step_status(request.flags.dry_run), None);
        return Ok(AddOutcome::Editable);
    }

    let requested = parse_all(request.packages)?;
    let mut manifest = Manifest::read(request.manifest_path)?;
    let project = manifest.ensure_project_section()?;
    let array = match &request.target {
        DependencyTarget::Required => manifest::ensure_dependency_list(project)?,
        DependencyTarget::Optional(group) => manifest::ensure_optional_group(project, group)?,
    };
    let mut current = load_set(array, &request.target)?;

    log.stage(&format!("Adding to {}", request.target));
    let mut added = Vec::new();
    let mut replaced = Vec::new();
    for requirement in requested {
        let spec = requirement.format();
        if let Some(existing) = current.get(requirement.name()) {
            if request.flags.dry_run {
                log.dry_run(&format!("would uninstall {existing}"));
            } else {
                log.info(&format!("uninstalling {existing}"));
                installer.uninstall(existing)?;
            }
            replaced.push(spec.clone());
        } else {
            added.push(spec.clone());
        }
        log.info(&format!("installing {spec}"));
        if let Err(e) = installer.install(&requirement, &request.flags) {
            log.record_step(
                &format!("install {spec}"),
                StepStatus::Failed,
                Some(e.to_string().as_str()),
            );
            return Err(e.into());
        }
        log.record_step(
            &format!("install {spec}"),
            step_status(request.flags.dry_run),
            None,
        );
        current.insert(requirement);
    }

    let manifest_name = request.manifest_path.display().to_string();
    if request.flags.dry_run {
        log.dry_run(&format!("would update {manifest_name}"));
        log.record_step(&format!("write {manifest_name}"), StepStatus::DryRun, None);
        return Ok(AddOutcome::Updated {
            added,
            replaced,
            written: false,
        });
    }

    replace_entries(array, current.to_strings());
    manifest.write(request.manifest_path)?;
    log.record_step(&format!("write {manifest_name}"), StepStatus::Ok, None);
    Ok(AddOutcome::Updated {
        added,
        replaced,
        written: true,
    })
}

/// Uninstall packages and drop them from the target list.
///
/// The batch is all-or-nothing: every name must be present before anything
/// is uninstalled. Removing the last entry of an optional group deletes the
/// group, and the `optional-dependencies` table if it becomes empty.
/// Returns the removed entries.
///
/// # Errors
///
/// Returns [`DependencyError::GroupNotFound`] for a missing optional group,
/// [`DependencyError::NotFound`] for a name not in the list, or the first
/// manifest or installer failure.
pub fn remove_packages(
    request: &RemoveRequest<'_>,
    installer: &dyn Installer,
    log: &dyn Log,
) -> Result<Vec<String>, PsychoError> {
    let requested = parse_all(request.packages)?;
    if requested.is_empty() {
        return Ok(Vec::new());
    }
    let mut manifest = Manifest::read(request.manifest_path)?;
    let project = manifest.ensure_project_section()?;
    let array = match &request.target {
        DependencyTarget::Required => manifest::ensure_dependency_list(project)?,
        DependencyTarget::Optional(group) => manifest::optional_group(project, group)?
            .ok_or_else(|| DependencyError::GroupNotFound {
                group: group.clone(),
            })?,
    };
    let mut current = load_set(array, &request.target)?;

    if let Some(missing) = requested.iter().find(|r| !current.contains(r.name())) {
        return Err(DependencyError::NotFound {
            name: missing.name().to_string(),
            target: request.target.to_string(),
        }
        .into());
    }

    log.stage(&format!("Removing from {}", request.target));
    let mut removed = Vec::new();
    for requirement in &requested {
        let Some(existing) = current.get(requirement.name()).cloned() else {
            continue;
        };
        log.info(&format!("uninstalling {existing}"));
        if let Err(e) = installer.uninstall(&existing) {
            log.record_step(
                &format!("uninstall {existing}"),
                StepStatus::Failed,
                Some(e.to_string().as_str()),
            );
            return Err(e.into());
        }
        log.record_step(&format!("uninstall {existing}"), StepStatus::Ok, None);
        current.remove(existing.name());
        removed.push(existing.format());
    }

    replace_entries(array, current.to_strings());
    if let DependencyTarget::Optional(group) = &request.target
        && current.is_empty()
        && prune_group(&mut manifest, group)?
    {
        log.info(&format!("removed empty optional group '{group}'"));
    }
    manifest.write(request.manifest_path)?;
    log.record_step(
        &format!("write {}", request.manifest_path.display()),
        StepStatus::Ok,
        None,
    );
    Ok(removed)
}

fn prune_group(manifest: &mut Manifest, group: &str) -> Result<bool, ManifestError> {
    let project = manifest.ensure_project_section()?;
    Ok(manifest::prune_optional_group(project, group))
}

const fn step_status(dry_run: bool) -> StepStatus {
    if dry_run {
        StepStatus::DryRun
    } else {
        StepStatus::Ok
    }
}
