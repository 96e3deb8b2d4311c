//! Platform detection and virtual environment layout.
use std::fmt;
use std::path::{Path, PathBuf};

/// Detected operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux, macOS and other Unix-like systems.
    Unix,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: if cfg!(target_os = "windows") {
                Os::Windows
            } else {
                Os::Unix
            },
        }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is a Windows platform.
    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self.os, Os::Windows)
    }

    /// Directory holding a virtual environment's executables.
    #[must_use]
    pub fn venv_bin_dir(&self, venv: &Path) -> PathBuf {
        venv.join(if self.is_windows() { "Scripts" } else { "bin" })
    }

    /// Interpreter path inside a virtual environment.
    #[must_use]
    pub fn venv_python(&self, venv: &Path) -> PathBuf {
        self.venv_bin_dir(venv).join(if self.is_windows() {
            "python.exe"
        } else {
            "python"
        })
    }

    /// Interpreter names to probe on `PATH`, most specific first.
    #[must_use]
    pub const fn python_candidates(&self) -> &'static [&'static str] {
        if self.is_windows() {
            &["python", "py"]
        } else {
            &["python3", "python"]
        }
    }
}
