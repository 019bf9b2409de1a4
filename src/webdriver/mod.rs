// src/webdriver/mod.rs

//! Driver manager (`webdriver-manager`) invocations.
//!
//! - [`WebdriverManager::update`] runs `update` to completion.
//! - [`WebdriverManager::standalone`] runs `start` until it exits.
//! - [`WebdriverManager::update_then_start`] (in [`two_phase`]) runs
//!   `update` and, only on a clean exit, leaves `start` running.

pub mod two_phase;

use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::exec::{launch, CommandSpec, LaunchHandle, ProcessBackend};
use crate::fs::FileSystem;
use crate::resolve::PathResolver;

pub use two_phase::{Phase, ServeHandle, TwoPhaseOutcome};

pub const UPDATE_COMMAND: &str = "update";
pub const START_COMMAND: &str = "start";
const STANDALONE_FLAG: &str = "--standalone";

/// Extra arguments for the `update` phase.
///
/// The default produces a bare `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebdriverOptions {
    /// Also fetch the standalone Selenium server.
    pub standalone: bool,
    /// Browsers to update, each forwarded as `--<browser>`.
    pub browsers: Vec<String>,
    /// Arguments forwarded verbatim to the manager.
    pub manager_args: Vec<String>,
}

/// `update [--standalone] [manager_args...] [--<browser>...]`
pub fn update_arguments(options: &WebdriverOptions) -> Vec<String> {
    let mut args = vec![UPDATE_COMMAND.to_string()];
    if options.standalone {
        args.push(STANDALONE_FLAG.to_string());
    }
    args.extend(options.manager_args.iter().cloned());
    args.extend(options.browsers.iter().map(|b| format!("--{b}")));
    args
}

/// Launches the driver manager binary found by a [`PathResolver`].
#[derive(Clone)]
pub struct WebdriverManager {
    resolver: PathResolver,
    fs: Arc<dyn FileSystem>,
    backend: Arc<dyn ProcessBackend>,
    options: WebdriverOptions,
}

impl WebdriverManager {
    pub fn new(
        resolver: PathResolver,
        fs: Arc<dyn FileSystem>,
        backend: Arc<dyn ProcessBackend>,
    ) -> Self {
        Self {
            resolver,
            fs,
            backend,
            options: WebdriverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: WebdriverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &WebdriverOptions {
        &self.options
    }

    pub fn update_command(&self) -> CommandSpec {
        CommandSpec::new(self.resolver.manager_path()).args(update_arguments(&self.options))
    }

    pub fn start_command(&self) -> CommandSpec {
        CommandSpec::new(self.resolver.manager_path()).arg(START_COMMAND)
    }

    /// Run `update` and translate its exit.
    pub async fn update(&self) -> Result<()> {
        let mut handle = self.spawn(self.update_command())?;
        handle.finish().await
    }

    /// Run `start` alone and translate its exit once the server stops.
    pub async fn standalone(&self) -> Result<()> {
        let mut handle = self.spawn(self.start_command())?;
        info!("driver manager server started");
        handle.finish().await
    }

    fn spawn(&self, command: CommandSpec) -> Result<LaunchHandle> {
        self.resolver
            .ensure_installed(&command.program, self.fs.as_ref())?;
        launch(self.backend.as_ref(), command)
    }
}
