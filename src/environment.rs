//! Process environment inspection for `env` and `which`.
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::exec::Executor;

/// The process environment, sorted by variable name.
///
/// Variables whose name or value is not valid Unicode are converted lossily.
#[must_use]
pub fn snapshot() -> BTreeMap<String, String> {
    std::env::vars_os()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect()
}

/// `NAME=VALUE` lines in name order.
#[must_use]
pub fn render_lines(vars: &BTreeMap<String, String>) -> String {
    vars.iter().fold(String::new(), |mut out, (k, v)| {
        let _ = writeln!(out, "{k}={v}");
        out
    })
}

/// A pretty-printed JSON object.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(vars: &BTreeMap<String, String>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(vars)
}

/// Resolve an executable the way child processes will see it.
#[must_use]
pub fn locate(executor: &dyn Executor, name: &str) -> Option<PathBuf> {
    executor.which(name)
}
