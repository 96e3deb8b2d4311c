//! Python project management from the command line.
//!
//! `psycho` edits `pyproject.toml` in place while driving `pip`, `build` and
//! `twine`, so that the dependency lists always describe what was installed.
//!
//! The public API is organised into layers:
//!
//! - **[`manifest`]** and **[`requirement`]**: format-preserving manifest
//!   access and PEP 508 specifiers
//! - **[`dependencies`]**: the add/remove reconciler
//! - **[`tools`]** and **[`exec`]**: argv construction for the packaging
//!   tools and the process executor seam
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod dependencies;
pub mod environment;
pub mod error;
pub mod exec;
pub mod init;
pub mod logging;
pub mod manifest;
pub mod platform;
pub mod requirement;
pub mod tools;
