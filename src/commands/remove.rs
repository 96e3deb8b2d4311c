//! Command: remove dependencies.
use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::RemoveOpts;
use crate::dependencies::{self, DependencyTarget, RemoveRequest};

/// Run the remove command.
///
/// # Errors
///
/// Returns an error if a package is not listed, the manifest cannot be
/// updated, or pip fails.
pub fn run(ctx: &Context, opts: &RemoveOpts) -> Result<()> {
    let request = RemoveRequest {
        manifest_path: &ctx.config.manifest_path,
        packages: &opts.packages,
        target: DependencyTarget::from_group(opts.optional.as_deref()),
    };
    let toolchain = ctx.toolchain();
    let pip = toolchain.pip();

    let result = dependencies::remove_packages(&request, &pip, ctx.log.as_ref());
    ctx.log.print_summary();

    let removed = result.context("Failed to remove dependencies")?;
    ctx.log
        .info(&format!("removed {} from {}", removed.join(", "), request.target));
    Ok(())
}
