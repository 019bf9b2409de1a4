// tests/shutdown_signal.rs

use std::io;
use std::time::Duration;

use protractor_pipe::shutdown::interrupted;
use protractor_pipe_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn delivered_signal_resolves() {
    init_tracing();
    with_timeout(interrupted(async { Ok(()) })).await;
}

#[tokio::test]
async fn listener_failure_is_not_an_interrupt() {
    init_tracing();

    let listener = async { Err(io::Error::other("signal driver unavailable")) };
    let waited = tokio::time::timeout(Duration::from_millis(100), interrupted(listener)).await;

    assert!(waited.is_err(), "a failed listener must not look like Ctrl-C");
}

#[tokio::test]
async fn run_keeps_going_when_listener_fails() {
    init_tracing();

    let listener = async { Err(io::Error::other("signal driver unavailable")) };
    let work = tokio::time::sleep(Duration::from_millis(20));

    let finished = with_timeout(async {
        tokio::select! {
            _ = work => true,
            _ = interrupted(listener) => false,
        }
    })
    .await;

    assert!(finished);
}
