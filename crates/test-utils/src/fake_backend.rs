use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use protractor_pipe::errors::{PipeError, Result};
use protractor_pipe::exec::{BoxFuture, ChildProcess, CommandSpec, ProcessBackend};
use protractor_pipe::types::ProcessOutcome;

/// What the next spawned fake process does.
#[derive(Debug, Clone)]
pub enum Script {
    /// Terminate right away with this outcome.
    Exit(ProcessOutcome),
    /// Never terminate on its own (a server, or a hung tool).
    Hang,
    /// Fail at spawn time.
    SpawnFails,
}

/// A process backend that:
/// - records every `CommandSpec` it was asked to spawn
/// - plays back queued [`Script`]s in order (exit 0 once the queue is empty)
/// - records which processes were killed.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    spawned: Arc<Mutex<Vec<CommandSpec>>>,
    killed: Arc<Mutex<Vec<CommandSpec>>>,
    scripts: Arc<Mutex<VecDeque<Script>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, script: Script) -> Self {
        self.scripts.lock().unwrap().push_back(script);
        self
    }

    pub fn then_exit(self, code: i32) -> Self {
        self.then(Script::Exit(ProcessOutcome::exited(code)))
    }

    pub fn then_signal(self, signal: &str) -> Self {
        self.then(Script::Exit(ProcessOutcome::signalled(signal)))
    }

    pub fn then_hang(self) -> Self {
        self.then(Script::Hang)
    }

    pub fn spawned(&self) -> Vec<CommandSpec> {
        self.spawned.lock().unwrap().clone()
    }

    pub fn killed(&self) -> Vec<CommandSpec> {
        self.killed.lock().unwrap().clone()
    }
}

impl ProcessBackend for FakeBackend {
    fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ChildProcess>> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Script::Exit(ProcessOutcome::exited(0)));

        if let Script::SpawnFails = script {
            return Err(PipeError::SpawnFailure {
                program: spec.program.clone(),
                source: std::io::Error::other("scripted spawn failure"),
            });
        }

        self.spawned.lock().unwrap().push(spec.clone());

        Ok(Box::new(FakeChild {
            spec: spec.clone(),
            script,
            killed: Arc::clone(&self.killed),
        }))
    }
}

struct FakeChild {
    spec: CommandSpec,
    script: Script,
    killed: Arc<Mutex<Vec<CommandSpec>>>,
}

impl ChildProcess for FakeChild {
    fn wait(&mut self) -> BoxFuture<'_, Result<ProcessOutcome>> {
        let script = self.script.clone();
        Box::pin(async move {
            match script {
                Script::Exit(outcome) => {
                    // Terminate asynchronously, like a real process would.
                    tokio::task::yield_now().await;
                    Ok(outcome)
                }
                Script::Hang | Script::SpawnFails => std::future::pending().await,
            }
        })
    }

    fn kill(&mut self) -> BoxFuture<'_, Result<()>> {
        let killed = Arc::clone(&self.killed);
        let spec = self.spec.clone();
        Box::pin(async move {
            killed.lock().unwrap().push(spec);
            Ok(())
        })
    }
}
