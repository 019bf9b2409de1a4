// src/pipeline/stage.rs

//! The Protractor sink stage.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::errors::{PipeError, Result};
use crate::exec::{launch, CommandSpec, ProcessBackend};
use crate::fs::FileSystem;
use crate::pipeline::arguments::build_arguments;
use crate::pipeline::collector::{FileCollector, SpecList};
use crate::resolve::PathResolver;
use crate::types::FileDescriptor;

const DEFAULT_NODE: &str = "node";
const DEBUG_ARG: &str = "debug";

/// Options for one runner launch. Immutable once handed to a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtractorOptions {
    /// The runner's own configuration file; always the first argument.
    pub config_file: PathBuf,
    /// Pass-through arguments, forwarded verbatim after the specs.
    pub args: Vec<String>,
    /// Append the runner's `debug` argument.
    pub debug: bool,
    /// Interpreter used to execute the runner's entry script.
    pub node: PathBuf,
}

impl ProtractorOptions {
    pub fn new(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: config_file.into(),
            args: Vec::new(),
            debug: false,
            node: PathBuf::from(DEFAULT_NODE),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_node(mut self, node: impl Into<PathBuf>) -> Self {
        self.node = node.into();
        self
    }

    /// User arguments plus the ones implied by flags.
    fn pass_through_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        if self.debug {
            args.push(DEBUG_ARG.to_string());
        }
        args
    }
}

/// Full invocation for a finalized spec list:
/// `node <cli.js> <config_file> [--specs a,b] [args...]`.
pub fn protractor_command(
    options: &ProtractorOptions,
    resolver: &PathResolver,
    specs: &SpecList,
) -> CommandSpec {
    let runner_args = build_arguments(
        &options.config_file,
        specs.paths(),
        &options.pass_through_args(),
    );

    CommandSpec::new(&options.node)
        .arg(resolver.cli_path())
        .args(runner_args)
}

/// Drive one stage to completion over an already-open input channel.
///
/// Waits for end-of-input, launches the runner once and resolves with its
/// verdict. Dropping this future while the runner is still alive kills it.
pub async fn run_stage(
    options: &ProtractorOptions,
    resolver: &PathResolver,
    fs: &dyn FileSystem,
    backend: &dyn ProcessBackend,
    input: mpsc::Receiver<FileDescriptor>,
) -> Result<()> {
    let specs = FileCollector::drain(input).await;

    let cli = resolver.cli_path();
    resolver.ensure_installed(&cli, fs)?;

    let command = protractor_command(options, resolver, &specs);
    info!(specs = specs.len(), command = %command, "starting test runner");

    let mut handle = launch(backend, command)?;
    handle.finish().await
}

/// A pipeline sink that launches the test runner when its input ends.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use protractor_pipe::pipeline::{ProtractorOptions, ProtractorStage};
/// # use protractor_pipe::resolve::PathResolver;
/// # use protractor_pipe::fs::RealFileSystem;
/// # use protractor_pipe::exec::TokioBackend;
/// # async fn demo() -> protractor_pipe::errors::Result<()> {
/// let stage = ProtractorStage::spawn(
///     ProtractorOptions::new("protractor.conf.js"),
///     PathResolver::from_current_dir()?,
///     Arc::new(RealFileSystem),
///     Arc::new(TokioBackend),
/// );
/// stage.write("e2e/login.spec.js".into()).await?;
/// stage.end().await
/// # }
/// ```
pub struct ProtractorStage {
    input: Option<mpsc::Sender<FileDescriptor>>,
    task: JoinHandle<Result<()>>,
}

impl ProtractorStage {
    /// Start the stage in the background; it begins collecting immediately.
    pub fn spawn(
        options: ProtractorOptions,
        resolver: PathResolver,
        fs: Arc<dyn FileSystem>,
        backend: Arc<dyn ProcessBackend>,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<FileDescriptor>(64);

        let task = tokio::spawn(async move {
            run_stage(&options, &resolver, fs.as_ref(), backend.as_ref(), rx).await
        });

        Self {
            input: Some(tx),
            task,
        }
    }

    /// Hand one file to the stage.
    pub async fn write(&self, file: FileDescriptor) -> Result<()> {
        let input = self.input.as_ref().ok_or(PipeError::StreamClosed)?;
        input
            .send(file)
            .await
            .map_err(|_| PipeError::StreamClosed)
    }

    /// A sender for feeding the stage from other tasks.
    ///
    /// Input only ends once every clone has been dropped as well.
    pub fn sender(&self) -> Option<mpsc::Sender<FileDescriptor>> {
        self.input.clone()
    }

    /// Signal end-of-input and wait for the runner's verdict.
    pub async fn end(mut self) -> Result<()> {
        drop(self.input.take());
        debug!("end of input signalled");

        match (&mut self.task).await {
            Ok(result) => result,
            Err(join_err) => Err(PipeError::Other(join_err.into())),
        }
    }

    /// Tear the stage down. A running child process is killed and no
    /// verdict is produced.
    pub fn abort(self) {
        debug!("stage aborted");
        self.task.abort();
    }
}

impl Drop for ProtractorStage {
    fn drop(&mut self) {
        // Dropping the stage without `end` abandons the run.
        self.task.abort();
    }
}
