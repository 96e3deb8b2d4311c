//! Command: build and upload.
use anyhow::{Context as _, Result};

use super::Context;
use super::upload::upload_options;
use crate::cli::PublishOpts;
use crate::logging::StepStatus;
use crate::tools::{self, BuildOptions};

/// Run the publish command.
///
/// # Errors
///
/// Returns an error if the build or upload fails, or the build produced
/// no files.
pub fn run(ctx: &Context, opts: &PublishOpts) -> Result<()> {
    let build = BuildOptions {
        verbose: ctx.verbose,
        ..BuildOptions::default()
    };
    let upload = upload_options(&opts.index, ctx.verbose);

    ctx.log.stage("Publishing");
    let result = tools::publish(&ctx.toolchain(), &build, &upload);
    match &result {
        Ok(files) => {
            for file in files {
                ctx.log.record_step(&format!("upload {file}"), StepStatus::Ok, None);
            }
        }
        Err(e) => ctx
            .log
            .record_step("publish", StepStatus::Failed, Some(e.to_string().as_str())),
    }
    ctx.log.print_summary();
    result.context("Failed to publish distributions")?;
    Ok(())
}
