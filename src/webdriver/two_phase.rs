// src/webdriver/two_phase.rs

//! Update-then-start sequencing.

use std::fmt;

use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::errors::{PipeError, Result};
use crate::exec::LaunchHandle;
use crate::types::{LaunchResult, LaunchState};
use crate::webdriver::WebdriverManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Update,
    Start,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Update => f.write_str("update"),
            Phase::Start => f.write_str("start"),
        }
    }
}

/// Where a two-phase launch ended up.
pub enum TwoPhaseOutcome {
    /// `update` succeeded and the server is running.
    Serving(ServeHandle),
    /// Cancelled while `update` was still running; `start` was never spawned.
    Cancelled,
}

impl fmt::Debug for TwoPhaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwoPhaseOutcome::Serving(_) => f.write_str("Serving"),
            TwoPhaseOutcome::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// The long-running `start` process.
///
/// Reaching this handle is the success criterion; the server is not
/// expected to exit on its own. Dropping the handle kills the server.
pub struct ServeHandle {
    handle: LaunchHandle,
}

impl ServeHandle {
    /// Stop the server.
    pub fn cancel(&mut self) {
        self.handle.cancel();
    }

    /// Wait for the server process to terminate.
    pub async fn wait(&mut self) -> Result<LaunchState> {
        self.handle.wait().await
    }
}

impl WebdriverManager {
    /// Run `update` to completion and, only if it exits with code 0, spawn
    /// `start`.
    ///
    /// A failing `update` is returned as its error and `start` is never
    /// spawned. Sending on `cancel` while `update` runs kills it and yields
    /// [`TwoPhaseOutcome::Cancelled`]; dropping the sender is not a
    /// cancellation. Once serving, cancel through [`ServeHandle::cancel`].
    pub async fn update_then_start(
        &self,
        mut cancel: oneshot::Receiver<()>,
    ) -> Result<TwoPhaseOutcome> {
        info!(phase = %Phase::Update, "driver manager phase starting");
        let mut update = self.spawn(self.update_command())?;

        let mut cancelled = false;
        let state = tokio::select! {
            state = update.wait() => state?,
            Ok(()) = &mut cancel => {
                info!(phase = %Phase::Update, "cancellation requested");
                cancelled = true;
                update.cancel();
                update.wait().await?
            }
        };

        match state {
            // `update` may have finished in the same instant the cancel fired.
            LaunchState::Finished(LaunchResult::Success) if cancelled => {
                return Ok(TwoPhaseOutcome::Cancelled);
            }
            LaunchState::Finished(LaunchResult::Success) => {}
            LaunchState::Finished(LaunchResult::Failure(reason)) => {
                warn!(phase = %Phase::Update, reason = %reason, "phase failed; not starting server");
                return Err(PipeError::from(reason));
            }
            LaunchState::Cancelled => return Ok(TwoPhaseOutcome::Cancelled),
        }

        info!(phase = %Phase::Start, "driver manager phase starting");
        let handle = self.spawn(self.start_command())?;
        Ok(TwoPhaseOutcome::Serving(ServeHandle { handle }))
    }
}
