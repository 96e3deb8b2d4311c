//! Core logging types: step entries, status, and the [`Log`] trait.

/// Outcome of one side-effecting step, kept for the run summary.
#[derive(Debug, Clone)]
pub struct StepEntry {
    /// Human-readable step name (e.g. `install requests>=2.0`).
    pub name: String,
    /// Final status of the step.
    pub status: StepStatus,
    /// Optional detail message.
    pub message: Option<String>,
}

/// Status of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step completed successfully.
    Ok,
    /// Step was skipped (nothing to do, or tool unavailable).
    Skipped,
    /// Step ran in dry-run mode; nothing was changed.
    DryRun,
    /// Step failed.
    Failed,
}

impl StepStatus {
    /// Summary glyph.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Skipped => "○",
            Self::DryRun => "~",
            Self::Failed => "✗",
        }
    }

    /// SGR color code used on the console.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Ok => "\x1b[32m",
            Self::Skipped => "\x1b[33m",
            Self::DryRun => "\x1b[37m",
            Self::Failed => "\x1b[31m",
        }
    }
}

/// Abstraction over logging backends.
///
/// Library code logs through `&dyn Log` so that commands can hand it the
/// process-wide [`Logger`](super::logger::Logger) while tests observe the
/// same calls through an isolated one.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a step result for the summary.
    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>);
}
