//! Command: locate an executable.
use anyhow::Result;

use super::Context;
use crate::cli::WhichOpts;
use crate::environment;

/// Print the path `opts.name` resolves to, searching the venv first.
///
/// # Errors
///
/// Returns an error if the executable is not found.
pub fn run(ctx: &Context, opts: &WhichOpts) -> Result<()> {
    match environment::locate(ctx.executor.as_ref(), &opts.name) {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => anyhow::bail!("{} not found", opts.name),
    }
}
