//! Command: create a new project.
use std::path::Path;

use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::InitOpts;
use crate::init::{self, ProjectMetadata};
use crate::logging::StepStatus;
use crate::tools::{InstallFlags, Installer as _, Toolchain};

/// Project metadata from the command line, defaulting the name to the
/// project directory's name.
///
/// # Errors
///
/// Returns an error if no name was given and the directory cannot be resolved.
pub fn metadata(opts: &InitOpts, project_dir: &Path) -> Result<ProjectMetadata> {
    let name = match &opts.name {
        Some(name) => name.clone(),
        None => init::default_project_name(project_dir)?,
    };
    Ok(ProjectMetadata {
        name,
        version: opts.project_version.clone(),
        description: opts.description.clone(),
        author: opts.author.clone(),
        email: opts.email.clone(),
    })
}

/// Run the init command.
///
/// # Errors
///
/// Returns an error if the manifest already exists, a file cannot be
/// written, or one of the `--create` steps fails.
pub fn run(ctx: &Context, opts: &InitOpts) -> Result<()> {
    let project_dir = &ctx.config.project_dir;
    let manifest_path = &ctx.config.manifest_path;
    let metadata = metadata(opts, project_dir)?;

    ctx.log.stage(&format!("Initializing {}", metadata.name));
    init::write_manifest(manifest_path, &metadata)
        .with_context(|| format!("Failed to initialize {}", metadata.name))?;
    ctx.log.record_step(
        &format!("write {}", manifest_path.display()),
        StepStatus::Ok,
        None,
    );

    let result = if opts.create {
        scaffold(ctx, &metadata.name)
    } else {
        Ok(())
    };
    ctx.log.print_summary();
    result
}

/// The `--create` steps: `.gitignore`, git repository, virtual environment,
/// source package and editable install.
fn scaffold(ctx: &Context, name: &str) -> Result<()> {
    let project_dir = &ctx.config.project_dir;
    let log = &ctx.log;

    if init::write_gitignore(project_dir)? {
        log.record_step("write .gitignore", StepStatus::Ok, None);
    } else {
        log.record_step(
            "write .gitignore",
            StepStatus::Skipped,
            Some("already exists"),
        );
    }

    if ctx.executor.which("git").is_some() {
        log.info("initializing git repository");
        ctx.executor.run_in(project_dir, "git", &["init"])?;
        log.record_step("git init", StepStatus::Ok, None);
    } else {
        log.record_step("git init", StepStatus::Skipped, Some("git not found"));
    }

    let venv = project_dir.join(".venv");
    let venv = std::path::absolute(&venv).unwrap_or(venv);
    let venv_python = ctx.config.platform.venv_python(&venv);
    let venv_python = venv_python.to_string_lossy();
    let venv_tools = Toolchain::new(&venv_python, project_dir, ctx.executor.as_ref());
    if venv.exists() {
        log.record_step("create .venv", StepStatus::Skipped, Some("already exists"));
    } else {
        log.info(&format!("creating virtual environment with {}", ctx.config.python));
        ctx.executor
            .run_in(project_dir, &ctx.config.python, &["-m", "venv", ".venv"])?;
        log.record_step("create .venv", StepStatus::Ok, None);
        venv_tools.pip().upgrade_self()?;
        log.record_step("upgrade pip", StepStatus::Ok, None);
    }

    let package_dir = init::create_package(project_dir, name)?;
    log.record_step(
        &format!("create {}", package_dir.display()),
        StepStatus::Ok,
        None,
    );

    log.info("installing project in editable mode");
    venv_tools
        .pip()
        .install_editable(project_dir, &InstallFlags::default())?;
    log.record_step("editable install", StepStatus::Ok, None);
    Ok(())
}
