// src/exec/launcher.rs

//! Single child process launcher.

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::errors::{PipeError, Result};
use crate::exec::backend::{ChildProcess, CommandSpec, ProcessBackend};
use crate::exec::exit::translate_outcome;
use crate::types::{LaunchResult, LaunchState};

/// Completion signal for one launched process.
///
/// The process is watched by a background Tokio task which resolves the
/// handle exactly once, either with a verdict or with
/// [`LaunchState::Cancelled`]. Dropping the handle before the process has
/// terminated kills the process; no verdict is produced in that case.
pub struct LaunchHandle {
    label: String,
    cancel: Option<oneshot::Sender<()>>,
    done: Option<oneshot::Receiver<Result<LaunchState>>>,
    finished: Option<LaunchState>,
}

/// Spawn `spec` through `backend` and start watching it.
///
/// Spawn errors (`ToolNotInstalled`, `SpawnFailure`) are returned here,
/// before any handle exists.
pub fn launch(backend: &dyn ProcessBackend, spec: CommandSpec) -> Result<LaunchHandle> {
    info!(program = %spec.program.display(), args = ?spec.args, "launching process");

    let child = backend.spawn(&spec)?;
    let label = spec.program.display().to_string();

    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let (done_tx, done_rx) = oneshot::channel::<Result<LaunchState>>();

    let watch_label = label.clone();
    tokio::spawn(async move {
        let state = watch_child(child, cancel_rx, &watch_label).await;
        if done_tx.send(state).is_err() {
            debug!(program = %watch_label, "launch handle gone before completion was delivered");
        }
    });

    Ok(LaunchHandle {
        label,
        cancel: Some(cancel_tx),
        done: Some(done_rx),
        finished: None,
    })
}

async fn watch_child(
    mut child: Box<dyn ChildProcess>,
    mut cancel_rx: oneshot::Receiver<()>,
    label: &str,
) -> Result<LaunchState> {
    // Either the process exits on its own, or the owner asks us to stop it
    // (explicit cancel, or the handle was dropped).
    tokio::select! {
        outcome = child.wait() => {
            let outcome = outcome?;
            let verdict = translate_outcome(&outcome);

            info!(
                program = %label,
                exit_code = ?outcome.exit_code,
                signal = ?outcome.signal,
                success = verdict.is_success(),
                "process exited"
            );

            Ok(LaunchState::Finished(verdict))
        }

        cancel = &mut cancel_rx => {
            match cancel {
                Ok(()) => info!(program = %label, "cancellation requested; killing process"),
                Err(_) => debug!(program = %label, "launch handle dropped; killing process"),
            }

            if let Err(e) = child.kill().await {
                warn!(program = %label, error = %e, "failed to kill child process on cancellation");
            }

            Ok(LaunchState::Cancelled)
        }
    }
}

impl LaunchHandle {
    /// Ask the watcher to kill the process.
    ///
    /// Has no effect once the process has already terminated; the verdict
    /// then stands.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            if cancel.send(()).is_err() {
                debug!(program = %self.label, "process already finished while cancelling");
            }
        }
    }

    /// Wait for the terminal state.
    ///
    /// Cancel-safe. Calling it again after it resolved returns the same
    /// state.
    pub async fn wait(&mut self) -> Result<LaunchState> {
        let Some(done) = self.done.as_mut() else {
            return self.finished.clone().ok_or(PipeError::StreamClosed);
        };

        let received = done.await;
        self.done = None;

        let state = match received {
            Ok(state) => state?,
            // The watcher task went away without reporting (runtime shutdown).
            Err(_) => LaunchState::Cancelled,
        };

        self.finished = Some(state.clone());
        Ok(state)
    }

    /// Wait and surface the verdict through the error channel.
    ///
    /// `Success` becomes `Ok(())`; a failure becomes `ReportedFailure` or
    /// `AbnormalTermination`; a cancelled launch becomes `Cancelled`.
    pub async fn finish(&mut self) -> Result<()> {
        match self.wait().await? {
            LaunchState::Finished(LaunchResult::Success) => Ok(()),
            LaunchState::Finished(LaunchResult::Failure(reason)) => Err(reason.into()),
            LaunchState::Cancelled => Err(PipeError::Cancelled),
        }
    }
}
