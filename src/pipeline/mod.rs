// src/pipeline/mod.rs

//! The pipeline side of the adapter.
//!
//! Files arrive one by one at a [`ProtractorStage`]. Nothing happens until
//! the input ends: the [`FileCollector`] then hands its finalized
//! [`SpecList`] to [`build_arguments`], and the resulting invocation is
//! launched once. The stage emits no items; it ends with `Ok(())` or with
//! the error describing the failure.

pub mod arguments;
pub mod collector;
pub mod stage;

pub use arguments::{build_arguments, SPECS_FLAG, SPEC_SEPARATOR};
pub use collector::{FileCollector, SpecList};
pub use stage::{protractor_command, run_stage, ProtractorOptions, ProtractorStage};
