//! Command: print version information.

/// Print the psycho version to stdout.
pub fn run() {
    let version = option_env!("PSYCHO_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("psycho {version}");
}
