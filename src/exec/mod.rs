// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] defines the [`ProcessBackend`] / [`ChildProcess`] seam and
//!   the production [`TokioBackend`] built on `tokio::process::Command`.
//!   Tests replace it with a fake that never spawns anything.
//! - [`launcher`] starts exactly one child and turns its lifecycle into a
//!   single-resolution [`LaunchHandle`] with an explicit cancel.
//! - [`exit`] maps a [`ProcessOutcome`](crate::types::ProcessOutcome) to a
//!   success/failure verdict.

pub mod backend;
pub mod exit;
pub mod launcher;

pub use backend::{BoxFuture, ChildProcess, CommandSpec, ProcessBackend, TokioBackend};
pub use exit::translate_outcome;
pub use launcher::{launch, LaunchHandle};
