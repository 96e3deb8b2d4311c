//! Command: build distributions.
use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::BuildOpts;
use crate::logging::StepStatus;
use crate::tools::BuildOptions;

/// Translate command-line options into build tool flags.
///
/// A relative `--outdir` is resolved against the current directory, since
/// the build itself runs in the project directory.
#[must_use]
pub fn build_options(opts: &BuildOpts, verbose: bool) -> BuildOptions {
    BuildOptions {
        version: opts.print_version,
        verbose,
        sdist: opts.sdist,
        wheel: opts.wheel,
        skip_dependency_check: opts.skip_dependency_check,
        no_isolation: opts.no_isolation,
        config_settings: opts.config_settings.clone(),
        outdir: opts
            .outdir
            .as_ref()
            .map(|dir| std::path::absolute(dir).unwrap_or_else(|_| dir.clone())),
        installer: opts.installer.clone(),
    }
}

/// Run the build command.
///
/// # Errors
///
/// Returns an error if the build tool fails; its exit code is kept.
pub fn run(ctx: &Context, opts: &BuildOpts) -> Result<()> {
    let options = build_options(opts, ctx.verbose);
    ctx.log.stage(&format!(
        "Building {}",
        ctx.config.project_dir.display()
    ));
    let result = ctx.toolchain().build(&options);
    match &result {
        Ok(()) => ctx.log.record_step("build", StepStatus::Ok, None),
        Err(e) => ctx
            .log
            .record_step("build", StepStatus::Failed, Some(e.to_string().as_str())),
    }
    ctx.log.print_summary();
    result.context("Failed to build distributions")
}
