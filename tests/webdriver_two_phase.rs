// tests/webdriver_two_phase.rs

use std::error::Error;

use tokio::sync::oneshot;

use protractor_pipe::errors::PipeError;
use protractor_pipe::resolve::FixedPlatform;
use protractor_pipe::types::LaunchState;
use protractor_pipe::webdriver::{update_arguments, TwoPhaseOutcome, WebdriverOptions};
use protractor_pipe_test_utils::{init_tracing, wait_until, with_timeout, FakeBackend, Fixture};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn update_then_start_on_clean_update() -> TestResult {
    init_tracing();
    let fx = Fixture::installed(FakeBackend::new().then_exit(0).then_hang());
    let manager = fx.manager(WebdriverOptions::default());
    let (_cancel_tx, cancel_rx) = oneshot::channel();

    let outcome = with_timeout(manager.update_then_start(cancel_rx)).await?;
    let mut server = match outcome {
        TwoPhaseOutcome::Serving(server) => server,
        other => panic!("expected Serving, got {other:?}"),
    };

    let spawned = fx.backend.spawned();
    assert_eq!(spawned.len(), 2);
    assert_eq!(spawned[0].program, fx.resolver.manager_path());
    assert_eq!(spawned[0].args, vec!["update"]);
    assert_eq!(spawned[1].program, fx.resolver.manager_path());
    assert_eq!(spawned[1].args, vec!["start"]);

    // The server keeps running until told otherwise.
    server.cancel();
    assert_eq!(with_timeout(server.wait()).await?, LaunchState::Cancelled);
    assert_eq!(fx.backend.killed(), vec![spawned[1].clone()]);
    Ok(())
}

#[tokio::test]
async fn failing_update_never_starts_the_server() -> TestResult {
    init_tracing();
    let fx = Fixture::installed(FakeBackend::new().then_exit(1).then_hang());
    let manager = fx.manager(WebdriverOptions::default());
    let (_cancel_tx, cancel_rx) = oneshot::channel();

    match with_timeout(manager.update_then_start(cancel_rx)).await {
        Err(PipeError::ReportedFailure { code }) => assert_eq!(code, 1),
        other => panic!("expected ReportedFailure, got {other:?}"),
    }

    let spawned = fx.backend.spawned();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].args[0], "update");
    Ok(())
}

#[tokio::test]
async fn update_killed_by_signal_never_starts_the_server() -> TestResult {
    init_tracing();
    let fx = Fixture::installed(FakeBackend::new().then_signal("SIGKILL"));
    let manager = fx.manager(WebdriverOptions::default());
    let (_cancel_tx, cancel_rx) = oneshot::channel();

    let result = with_timeout(manager.update_then_start(cancel_rx)).await;
    assert!(matches!(result, Err(PipeError::AbnormalTermination { .. })));
    assert_eq!(fx.backend.spawned().len(), 1);
    Ok(())
}

#[tokio::test]
async fn cancelling_during_update_kills_it_and_skips_start() -> TestResult {
    init_tracing();
    let fx = Fixture::installed(FakeBackend::new().then_hang());
    let manager = fx.manager(WebdriverOptions::default());
    let (cancel_tx, cancel_rx) = oneshot::channel();

    let running = tokio::spawn(async move { manager.update_then_start(cancel_rx).await });

    let backend = fx.backend.clone();
    wait_until(move || backend.spawned().len() == 1).await;
    cancel_tx.send(()).expect("launcher still listening");

    let outcome = with_timeout(running).await??;
    assert!(matches!(outcome, TwoPhaseOutcome::Cancelled));
    assert_eq!(fx.backend.spawned().len(), 1);
    assert_eq!(fx.backend.killed().len(), 1);
    assert_eq!(fx.backend.killed()[0].args[0], "update");
    Ok(())
}

#[tokio::test]
async fn dropping_the_cancel_sender_is_not_a_cancellation() -> TestResult {
    init_tracing();
    let fx = Fixture::installed(FakeBackend::new().then_exit(0).then_hang());
    let manager = fx.manager(WebdriverOptions::default());
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    drop(cancel_tx);

    let outcome = with_timeout(manager.update_then_start(cancel_rx)).await?;
    assert!(matches!(outcome, TwoPhaseOutcome::Serving(_)));
    Ok(())
}

#[tokio::test]
async fn missing_manager_is_tool_not_installed() -> TestResult {
    init_tracing();
    let fx = Fixture::not_installed(FakeBackend::new());
    let manager = fx.manager(WebdriverOptions::default());
    let (_cancel_tx, cancel_rx) = oneshot::channel();

    match with_timeout(manager.update_then_start(cancel_rx)).await {
        Err(PipeError::ToolNotInstalled(path)) => assert_eq!(path, fx.resolver.manager_path()),
        other => panic!("expected ToolNotInstalled, got {other:?}"),
    }
    assert!(fx.backend.spawned().is_empty());
    Ok(())
}

#[tokio::test]
async fn windows_host_launches_the_cmd_shim() -> TestResult {
    init_tracing();
    let fx = Fixture::on_platform(FakeBackend::new(), &FixedPlatform::windows());
    fx.fs.add_file(fx.resolver.manager_path());
    let manager = fx.manager(WebdriverOptions::default());

    with_timeout(manager.update()).await?;

    let spawned = fx.backend.spawned();
    assert_eq!(
        spawned[0].program.file_name().and_then(|n| n.to_str()),
        Some("webdriver-manager.cmd")
    );
    Ok(())
}

#[tokio::test]
async fn single_phase_helpers_translate_exit() -> TestResult {
    init_tracing();
    let fx = Fixture::installed(FakeBackend::new().then_exit(0).then_exit(3));
    let manager = fx.manager(WebdriverOptions::default());

    with_timeout(manager.update()).await?;
    let result = with_timeout(manager.standalone()).await;
    assert!(matches!(result, Err(PipeError::ReportedFailure { code: 3 })));

    let spawned = fx.backend.spawned();
    assert_eq!(spawned[0].args, vec!["update"]);
    assert_eq!(spawned[1].args, vec!["start"]);
    Ok(())
}

#[test]
fn update_arguments_with_options() {
    let options = WebdriverOptions {
        standalone: true,
        browsers: vec!["chrome".to_string(), "gecko".to_string()],
        manager_args: vec!["--versions.chrome".to_string(), "2.38".to_string()],
    };

    assert_eq!(
        update_arguments(&options),
        vec![
            "update",
            "--standalone",
            "--versions.chrome",
            "2.38",
            "--chrome",
            "--gecko",
        ]
    );
    assert_eq!(update_arguments(&WebdriverOptions::default()), vec!["update"]);
}
