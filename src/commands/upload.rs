//! Command: upload existing distributions.
use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::{IndexOpts, UploadOpts};
use crate::logging::StepStatus;
use crate::tools::UploadOptions;

/// Translate command-line index options into twine flags.
#[must_use]
pub fn upload_options(index: &IndexOpts, verbose: bool) -> UploadOptions {
    UploadOptions {
        repository: index.repository.clone(),
        repository_url: index.repository_url.clone(),
        attestations: index.attestations,
        sign: index.sign,
        sign_with: index.sign_with.clone(),
        identity: index.identity.clone(),
        username: index.username.clone(),
        password: index.password.clone(),
        non_interactive: index.non_interactive,
        comment: index.comment.clone(),
        skip_existing: index.skip_existing,
        cert: index.cert.clone(),
        client_cert: index.client_cert.clone(),
        verbose,
        disable_progress_bar: index.disable_progress_bar,
    }
}

/// Run the upload command.
///
/// # Errors
///
/// Returns an error if twine fails; its exit code is kept.
pub fn run(ctx: &Context, opts: &UploadOpts) -> Result<()> {
    let options = upload_options(&opts.index, ctx.verbose);
    ctx.log
        .stage(&format!("Uploading {} file(s)", opts.files.len()));
    for file in &opts.files {
        ctx.log.debug(&file.display().to_string());
    }
    let result = ctx.toolchain().upload(&options, &opts.files);
    match &result {
        Ok(()) => ctx.log.record_step("upload", StepStatus::Ok, None),
        Err(e) => ctx
            .log
            .record_step("upload", StepStatus::Failed, Some(e.to_string().as_str())),
    }
    ctx.log.print_summary();
    result.context("Failed to upload distributions")
}
