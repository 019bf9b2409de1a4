// src/types.rs

//! Plain data shared between the pipeline, the launcher and the CLI.

use std::fmt;
use std::path::{Path, PathBuf};

/// One file flowing through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: PathBuf,
}

impl FileDescriptor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl From<PathBuf> for FileDescriptor {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FileDescriptor {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// How a child process terminated.
///
/// Mirrors the `(code, signal)` pair an OS reports: a normal exit carries a
/// code and no signal, a signal-terminated process carries no code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub exit_code: Option<i32>,
    pub signal: Option<String>,
}

impl ProcessOutcome {
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            signal: None,
        }
    }

    pub fn signalled(signal: impl Into<String>) -> Self {
        Self {
            exit_code: None,
            signal: Some(signal.into()),
        }
    }

    /// Neither a code nor a known signal (e.g. the platform gave us nothing).
    pub fn unknown() -> Self {
        Self {
            exit_code: None,
            signal: None,
        }
    }

    pub fn is_clean_exit(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ProcessOutcome {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            exit_code: status.code(),
            signal: signal_name(&status),
        }
    }
}

#[cfg(unix)]
fn signal_name(status: &std::process::ExitStatus) -> Option<String> {
    use std::os::unix::process::ExitStatusExt;

    let name = match status.signal()? {
        1 => "SIGHUP",
        2 => "SIGINT",
        3 => "SIGQUIT",
        4 => "SIGILL",
        6 => "SIGABRT",
        8 => "SIGFPE",
        9 => "SIGKILL",
        11 => "SIGSEGV",
        13 => "SIGPIPE",
        14 => "SIGALRM",
        15 => "SIGTERM",
        other => return Some(format!("SIG{other}")),
    };
    Some(name.to_string())
}

#[cfg(not(unix))]
fn signal_name(_status: &std::process::ExitStatus) -> Option<String> {
    None
}

/// Why a launch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The wrapped tool exited on its own with a non-zero code.
    ReportedFailure { code: i32 },
    /// The process ended without an exit code (signal, OOM kill, crash).
    AbnormalTermination { signal: Option<String> },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::ReportedFailure { code } => {
                write!(f, "wrapped tool reported failure, exit code = {code}")
            }
            FailureReason::AbnormalTermination { signal: Some(sig) } => {
                write!(f, "process terminated abnormally (signal {sig})")
            }
            FailureReason::AbnormalTermination { signal: None } => {
                write!(f, "process terminated abnormally")
            }
        }
    }
}

/// Verdict derived from a [`ProcessOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchResult {
    Success,
    Failure(FailureReason),
}

impl LaunchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LaunchResult::Success)
    }
}

/// Terminal state of a single launched process.
///
/// A process killed on request never produces a verdict; it ends up
/// `Cancelled` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchState {
    Finished(LaunchResult),
    Cancelled,
}
