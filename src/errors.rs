// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::FailureReason;

#[derive(Error, Debug)]
pub enum PipeError {
    #[error("Tool not installed: {0:?} does not exist")]
    ToolNotInstalled(PathBuf),

    #[error("Failed to spawn {program:?}: {source}")]
    SpawnFailure {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("wrapped tool reported failure, exit code = {code}")]
    ReportedFailure { code: i32 },

    #[error("process terminated abnormally{}", signal_suffix(.signal))]
    AbnormalTermination { signal: Option<String> },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Launch cancelled before the process terminated")]
    Cancelled,

    #[error("Pipeline stage already closed")]
    StreamClosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PipeError {
    /// True when the failure points at the environment (missing tool, spawn
    /// failure, killed process) rather than at a test-run result.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            PipeError::ToolNotInstalled(_)
                | PipeError::SpawnFailure { .. }
                | PipeError::AbnormalTermination { .. }
        )
    }

    /// Exit code the binary should use when surfacing this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipeError::ReportedFailure { code } => *code,
            _ => 1,
        }
    }
}

impl From<FailureReason> for PipeError {
    fn from(reason: FailureReason) -> Self {
        match reason {
            FailureReason::ReportedFailure { code } => PipeError::ReportedFailure { code },
            FailureReason::AbnormalTermination { signal } => {
                PipeError::AbnormalTermination { signal }
            }
        }
    }
}

fn signal_suffix(signal: &Option<String>) -> String {
    match signal {
        Some(sig) => format!(" (signal {sig})"),
        None => String::new(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipeError>;
