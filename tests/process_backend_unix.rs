// tests/process_backend_unix.rs
//
// Exercises the real Tokio backend with `sh`, so Unix only.

#![cfg(unix)]

use std::error::Error;
use std::time::{Duration, Instant};

use protractor_pipe::errors::PipeError;
use protractor_pipe::exec::{launch, CommandSpec, TokioBackend};
use protractor_pipe::types::{FailureReason, LaunchResult, LaunchState};
use protractor_pipe_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh").args(["-c", script])
}

#[tokio::test]
async fn clean_exit_is_success() -> TestResult {
    init_tracing();
    let mut handle = launch(&TokioBackend, sh("exit 0"))?;

    let state = with_timeout(handle.wait()).await?;
    assert_eq!(state, LaunchState::Finished(LaunchResult::Success));

    // A second wait returns the same verdict.
    assert_eq!(handle.wait().await?, state);
    Ok(())
}

#[tokio::test]
async fn exit_code_is_propagated() -> TestResult {
    init_tracing();
    let mut handle = launch(&TokioBackend, sh("exit 3"))?;

    assert_eq!(
        with_timeout(handle.wait()).await?,
        LaunchState::Finished(LaunchResult::Failure(FailureReason::ReportedFailure {
            code: 3
        }))
    );
    Ok(())
}

#[tokio::test]
async fn signal_death_is_abnormal_termination() -> TestResult {
    init_tracing();
    let mut handle = launch(&TokioBackend, sh("kill -s TERM $$"))?;

    match with_timeout(handle.finish()).await {
        Err(PipeError::AbnormalTermination { signal }) => {
            assert_eq!(signal.as_deref(), Some("SIGTERM"))
        }
        other => panic!("expected AbnormalTermination, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn cancel_kills_a_long_running_process() -> TestResult {
    init_tracing();
    let started = Instant::now();
    let mut handle = launch(&TokioBackend, CommandSpec::new("sleep").arg("30"))?;

    handle.cancel();
    assert_eq!(with_timeout(handle.wait()).await?, LaunchState::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(10));

    assert!(matches!(handle.finish().await, Err(PipeError::Cancelled)));
    Ok(())
}

#[tokio::test]
async fn cancel_after_exit_keeps_the_verdict() -> TestResult {
    init_tracing();
    let mut handle = launch(&TokioBackend, sh("exit 0"))?;

    let state = with_timeout(handle.wait()).await?;
    handle.cancel();
    assert_eq!(handle.wait().await?, state);
    Ok(())
}

#[tokio::test]
async fn missing_program_is_tool_not_installed() {
    init_tracing();
    let result = launch(
        &TokioBackend,
        CommandSpec::new("/definitely/not/installed/webdriver-manager"),
    );

    match result {
        Err(PipeError::ToolNotInstalled(path)) => {
            assert!(path.ends_with("webdriver-manager"))
        }
        Err(other) => panic!("expected ToolNotInstalled, got {other:?}"),
        Ok(_) => panic!("expected spawn to fail"),
    }
}
