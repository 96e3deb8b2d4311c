//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::tools::ConfigSetting;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "psycho",
    about = "Manage a Python project's pyproject.toml, environment and releases",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (also forwarded to build and twine)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options accepted by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Path of the project manifest
    #[arg(long, global = true, default_value = "pyproject.toml")]
    pub project_file: PathBuf,

    /// Python interpreter used to run pip, build and twine
    #[arg(long, global = true)]
    pub python: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install packages and record them as dependencies
    Add(AddOpts),
    /// Uninstall packages and drop them from the dependencies
    Remove(RemoveOpts),
    /// Build source and wheel distributions
    Build(BuildOpts),
    /// Build and upload to a package index in one step
    Publish(PublishOpts),
    /// Upload existing distributions to a package index
    Upload(UploadOpts),
    /// Create a new pyproject.toml (and optionally a full project)
    Init(InitOpts),
    /// Print the environment variables
    Env(EnvOpts),
    /// Print the path of an executable
    Which(WhichOpts),
    /// Generate shell completion scripts
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the per-command log file.
    #[must_use]
    pub const fn log_name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Build(_) => "build",
            Self::Publish(_) => "publish",
            Self::Upload(_) => "upload",
            Self::Init(_) => "init",
            Self::Env(_) => "env",
            Self::Which(_) => "which",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `add` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct AddOpts {
    /// Dependency specifiers (e.g. `requests>=2.0`); none installs the project in editable mode
    pub packages: Vec<String>,

    /// Add to this optional dependency group instead of the main list
    #[arg(short, long, value_name = "GROUP")]
    pub optional: Option<String>,

    /// Include pre-release and development versions
    #[arg(long)]
    pub pre: bool,

    /// Resolve without installing or writing the manifest
    #[arg(long)]
    pub dry_run: bool,

    /// Upgrade packages to the newest available version
    #[arg(short = 'U', long)]
    pub upgrade: bool,

    /// Base URL of the package index
    #[arg(long, value_name = "URL")]
    pub index_url: Option<String>,

    /// Extra package index URL
    #[arg(long, value_name = "URL")]
    pub extra_index_url: Option<String>,
}

/// Options for the `remove` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RemoveOpts {
    /// Packages to remove
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Remove from this optional dependency group instead of the main list
    #[arg(short, long, value_name = "GROUP")]
    pub optional: Option<String>,
}

/// Options for the `build` subcommand.
#[derive(Parser, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct BuildOpts {
    /// Print the build tool's version and exit
    #[arg(long)]
    pub print_version: bool,

    /// Build a source distribution
    #[arg(short, long)]
    pub sdist: bool,

    /// Build a wheel
    #[arg(short, long)]
    pub wheel: bool,

    /// Do not check that build dependencies are installed
    #[arg(short = 'x', long)]
    pub skip_dependency_check: bool,

    /// Build in the current environment instead of an isolated one
    #[arg(short, long)]
    pub no_isolation: bool,

    /// Settings passed to the backend (NAME or NAME=VALUE), repeatable
    #[arg(short = 'C', long = "config-setting", value_name = "NAME[=VALUE]")]
    pub config_settings: Vec<ConfigSetting>,

    /// Output directory (defaults to {project}/dist)
    #[arg(short, long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Python package installer used for isolated builds
    #[arg(long, value_name = "INSTALLER")]
    pub installer: Option<String>,
}

/// Package index options shared by `upload` and `publish`.
#[derive(Args, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct IndexOpts {
    /// Repository section of ~/.pypirc
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Repository URL, overriding --repository
    #[arg(long, value_name = "URL")]
    pub repository_url: Option<String>,

    /// Upload attestations alongside the distributions
    #[arg(long)]
    pub attestations: bool,

    /// Sign files before uploading
    #[arg(short, long)]
    pub sign: bool,

    /// GPG program used to sign
    #[arg(long, value_name = "PROGRAM")]
    pub sign_with: Option<String>,

    /// GPG identity used to sign
    #[arg(short, long)]
    pub identity: Option<String>,

    /// Username for the repository
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (or token) for the repository
    #[arg(short, long)]
    pub password: Option<String>,

    /// Never prompt for credentials
    #[arg(long)]
    pub non_interactive: bool,

    /// Comment attached to the uploaded distributions
    #[arg(short, long)]
    pub comment: Option<String>,

    /// Continue when a file already exists on the index
    #[arg(long)]
    pub skip_existing: bool,

    /// CA bundle used to verify the repository
    #[arg(long, value_name = "PATH")]
    pub cert: Option<PathBuf>,

    /// Client certificate (PEM) for the repository
    #[arg(long, value_name = "PATH")]
    pub client_cert: Option<PathBuf>,

    /// Hide the upload progress bar
    #[arg(long)]
    pub disable_progress_bar: bool,
}

/// Options for the `upload` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct UploadOpts {
    /// Target index and credentials.
    #[command(flatten)]
    pub index: IndexOpts,

    /// Distribution files to upload
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Options for the `publish` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct PublishOpts {
    /// Target index and credentials.
    #[command(flatten)]
    pub index: IndexOpts,
}

/// Options for the `init` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InitOpts {
    /// Project name (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Initial project version
    #[arg(long, default_value = "0.1.0")]
    pub project_version: String,

    /// One-line project description
    #[arg(long)]
    pub description: Option<String>,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// Author email
    #[arg(long)]
    pub email: Option<String>,

    /// Also create .gitignore, a git repository, a virtual environment and the source package
    #[arg(long)]
    pub create: bool,
}

/// Options for the `env` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct EnvOpts {
    /// Print a JSON object instead of NAME=VALUE lines
    #[arg(long)]
    pub json: bool,
}

/// Options for the `which` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct WhichOpts {
    /// Executable to look up
    pub name: String,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    pub shell: Shell,
}
