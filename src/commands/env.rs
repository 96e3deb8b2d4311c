//! Command: print the environment.
use anyhow::Result;

use super::Context;
use crate::cli::EnvOpts;
use crate::environment;

/// Print every environment variable, sorted by name.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(ctx: &Context, opts: &EnvOpts) -> Result<()> {
    ctx.log.debug(&format!("python: {}", ctx.config.python));
    match &ctx.config.venv {
        Some(venv) => ctx.log.debug(&format!("venv: {}", venv.display())),
        None => ctx.log.debug("venv: none"),
    }
    let vars = environment::snapshot();
    if opts.json {
        println!("{}", environment::render_json(&vars)?);
    } else {
        print!("{}", environment::render_lines(&vars));
    }
    Ok(())
}
