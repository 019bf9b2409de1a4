// tests/exit_translation.rs

use protractor_pipe::errors::PipeError;
use protractor_pipe::exec::translate_outcome;
use protractor_pipe::types::{FailureReason, LaunchResult, ProcessOutcome};

#[test]
fn exit_zero_is_success() {
    assert_eq!(translate_outcome(&ProcessOutcome::exited(0)), LaunchResult::Success);
}

#[test]
fn non_zero_exit_is_reported_failure_with_code() {
    assert_eq!(
        translate_outcome(&ProcessOutcome::exited(255)),
        LaunchResult::Failure(FailureReason::ReportedFailure { code: 255 })
    );
    assert_eq!(
        translate_outcome(&ProcessOutcome::exited(1)),
        LaunchResult::Failure(FailureReason::ReportedFailure { code: 1 })
    );
}

#[test]
fn missing_code_is_abnormal_termination() {
    assert_eq!(
        translate_outcome(&ProcessOutcome::signalled("SIGABRT")),
        LaunchResult::Failure(FailureReason::AbnormalTermination {
            signal: Some("SIGABRT".to_string())
        })
    );
    assert_eq!(
        translate_outcome(&ProcessOutcome::unknown()),
        LaunchResult::Failure(FailureReason::AbnormalTermination { signal: None })
    );
}

#[test]
fn failure_reasons_map_to_distinct_errors() {
    let reported = PipeError::from(FailureReason::ReportedFailure { code: 255 });
    let abnormal = PipeError::from(FailureReason::AbnormalTermination {
        signal: Some("SIGABRT".to_string()),
    });

    assert!(matches!(reported, PipeError::ReportedFailure { code: 255 }));
    assert!(!reported.is_infrastructure());
    assert_eq!(reported.exit_code(), 255);
    assert_eq!(
        reported.to_string(),
        "wrapped tool reported failure, exit code = 255"
    );

    assert!(matches!(abnormal, PipeError::AbnormalTermination { .. }));
    assert!(abnormal.is_infrastructure());
    assert_eq!(abnormal.exit_code(), 1);
    assert_eq!(
        abnormal.to_string(),
        "process terminated abnormally (signal SIGABRT)"
    );
}

#[test]
fn abnormal_termination_without_signal_has_plain_message() {
    let err = PipeError::AbnormalTermination { signal: None };
    assert_eq!(err.to_string(), "process terminated abnormally");
}
