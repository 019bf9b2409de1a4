// src/exec/exit.rs

//! Exit status translation.

use crate::types::{FailureReason, LaunchResult, ProcessOutcome};

/// Map a terminated process to a verdict.
///
/// - code `0` is success,
/// - any other code is a failure the tool reported itself,
/// - no code at all means the process was killed or crashed.
pub fn translate_outcome(outcome: &ProcessOutcome) -> LaunchResult {
    match outcome.exit_code {
        Some(0) => LaunchResult::Success,
        Some(code) => LaunchResult::Failure(FailureReason::ReportedFailure { code }),
        None => LaunchResult::Failure(FailureReason::AbnormalTermination {
            signal: outcome.signal.clone(),
        }),
    }
}
