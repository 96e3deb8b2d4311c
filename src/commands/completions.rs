//! Command: shell completion scripts.
use clap::CommandFactory as _;

use crate::cli::{Cli, CompletionsOpts};

/// Write the completion script for the requested shell to stdout.
pub fn run(opts: &CompletionsOpts) {
    clap_complete::generate(
        opts.shell,
        &mut Cli::command(),
        "psycho",
        &mut std::io::stdout(),
    );
}
