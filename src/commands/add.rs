//! Command: add dependencies.
use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::AddOpts;
use crate::dependencies::{self, AddOutcome, AddRequest, DependencyTarget};
use crate::tools::InstallFlags;

/// Install flags from the command line, falling back to `[tool.psycho]`
/// for the index URLs.
#[must_use]
pub fn install_flags(ctx: &Context, opts: &AddOpts) -> InstallFlags {
    let settings = &ctx.config.settings;
    InstallFlags {
        pre: opts.pre,
        dry_run: opts.dry_run,
        upgrade: opts.upgrade,
        index_url: opts.index_url.clone().or_else(|| settings.index_url.clone()),
        extra_index_url: opts
            .extra_index_url
            .clone()
            .or_else(|| settings.extra_index_url.clone()),
    }
}

/// Run the add command.
///
/// # Errors
///
/// Returns an error if a specifier is invalid, the manifest cannot be
/// updated, or pip fails.
pub fn run(ctx: &Context, opts: &AddOpts) -> Result<()> {
    let request = AddRequest {
        manifest_path: &ctx.config.manifest_path,
        packages: &opts.packages,
        target: DependencyTarget::from_group(opts.optional.as_deref()),
        flags: install_flags(ctx, opts),
    };
    let toolchain = ctx.toolchain();
    let pip = toolchain.pip();

    let result = dependencies::add_packages(&request, &pip, ctx.log.as_ref());
    ctx.log.print_summary();

    match result.context("Failed to add dependencies")? {
        AddOutcome::Editable => ctx.log.info("project installed in editable mode"),
        AddOutcome::Updated {
            added,
            replaced,
            written,
        } => {
            if !added.is_empty() {
                ctx.log.info(&format!("added {}", added.join(", ")));
            }
            if !replaced.is_empty() {
                ctx.log.info(&format!("replaced {}", replaced.join(", ")));
            }
            if !written {
                ctx.log.dry_run(&format!(
                    "{} left unchanged",
                    ctx.config.manifest_path.display()
                ));
            }
        }
    }
    Ok(())
}
