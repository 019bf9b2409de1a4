// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The launcher talks to a [`ProcessBackend`] instead of `tokio::process`
//! directly, so tests can script exit codes and signals without real
//! processes.

use std::ffi::OsString;
use std::fmt;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::debug;

use crate::errors::{PipeError, Result};
use crate::types::ProcessOutcome;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Fully built invocation: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// A running child process owned by exactly one launcher.
pub trait ChildProcess: Send {
    /// Resolve once the process has terminated.
    ///
    /// Must be cancel-safe: dropping the future before it resolves leaves
    /// the child running and `wait` may be called again.
    fn wait(&mut self) -> BoxFuture<'_, Result<ProcessOutcome>>;

    /// Forcibly terminate the process and reap it.
    fn kill(&mut self) -> BoxFuture<'_, Result<()>>;
}

/// Trait abstracting how a [`CommandSpec`] becomes a running process.
pub trait ProcessBackend: Send + Sync {
    fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ChildProcess>>;
}

/// Real backend used in production.
///
/// Children inherit stdin/stdout/stderr and the parent environment, and
/// are killed if their handle is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioBackend;

impl ProcessBackend for TokioBackend {
    fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ChildProcess>> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                PipeError::ToolNotInstalled(spec.program.clone())
            } else {
                PipeError::SpawnFailure {
                    program: spec.program.clone(),
                    source,
                }
            }
        })?;

        debug!(program = %spec.program.display(), pid = ?child.id(), "child process spawned");
        Ok(Box::new(TokioChild { child }))
    }
}

struct TokioChild {
    child: Child,
}

impl ChildProcess for TokioChild {
    fn wait(&mut self) -> BoxFuture<'_, Result<ProcessOutcome>> {
        Box::pin(async move {
            let status = self.child.wait().await?;
            Ok(ProcessOutcome::from(status))
        })
    }

    fn kill(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.child.kill().await?;
            Ok(())
        })
    }
}
