// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `protractor-pipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "protractor-pipe",
    version,
    about = "Feed spec files to the Protractor test runner and manage webdriver-manager.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `ProtractorPipe.toml` in the current working directory, if
    /// it exists.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory the node_modules layout is resolved from.
    #[arg(long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Override the dependency binary directory (node_modules/.bin).
    #[arg(long, value_name = "DIR", global = true)]
    pub bin_dir: Option<PathBuf>,

    /// Override the test runner's cli.js location.
    #[arg(long, value_name = "PATH", global = true)]
    pub cli_path: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PROTRACTOR_PIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Collect spec files and run the test runner once over all of them.
    Run(RunArgs),

    /// Run `webdriver-manager update`, then keep `webdriver-manager start` running.
    Webdriver(WebdriverArgs),

    /// Run `webdriver-manager update` only.
    WebdriverUpdate(WebdriverArgs),

    /// Run `webdriver-manager start` only.
    WebdriverStandalone,

    /// Print the resolved tool locations.
    Paths,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// The test runner's configuration file.
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Also read spec paths from stdin, one per line.
    #[arg(long)]
    pub stdin: bool,

    /// Append the runner's `debug` argument.
    #[arg(long)]
    pub debug: bool,

    /// Interpreter for the runner's entry script.
    #[arg(long, value_name = "PATH")]
    pub node: Option<PathBuf>,

    /// Print the command that would be run, but don't run it.
    #[arg(long)]
    pub dry_run: bool,

    /// Spec files, in the order they should be passed on.
    #[arg(value_name = "SPEC")]
    pub specs: Vec<PathBuf>,

    /// Arguments forwarded verbatim to the test runner (after `--`).
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct WebdriverArgs {
    /// Also update the standalone Selenium server.
    #[arg(long)]
    pub standalone: bool,

    /// Browser driver to update (repeatable), passed on as `--<browser>`.
    #[arg(long = "browser", value_name = "NAME")]
    pub browsers: Vec<String>,

    /// Arguments forwarded verbatim to webdriver-manager (after `--`).
    #[arg(last = true, value_name = "ARGS")]
    pub manager_args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
