// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod pipeline;
pub mod resolve;
pub mod shutdown;
pub mod types;
pub mod webdriver;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::info;

use crate::cli::{CliArgs, Command, RunArgs, WebdriverArgs};
use crate::config::{load_or_default, ConfigFile, RawConfigFile};
use crate::errors::{PipeError, Result};
use crate::exec::TokioBackend;
use crate::fs::RealFileSystem;
use crate::pipeline::{protractor_command, FileCollector, ProtractorStage};
use crate::resolve::NativePlatform;
use crate::types::{FileDescriptor, LaunchResult, LaunchState};
use crate::webdriver::{TwoPhaseOutcome, WebdriverManager};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + CLI overrides
/// - path resolution
/// - the selected subcommand
/// - Ctrl-C handling (kills the active child)
pub async fn run(args: CliArgs) -> Result<()> {
    let mut raw = load_or_default(args.config.as_deref())?;
    apply_global_overrides(&mut raw, &args);

    match &args.command {
        Command::Run(run_args) => {
            apply_run_overrides(&mut raw, run_args);
            let cfg = ConfigFile::try_from(raw)?;
            run_protractor(&cfg, run_args).await
        }
        Command::Webdriver(wd_args) => {
            apply_webdriver_overrides(&mut raw, wd_args);
            let cfg = ConfigFile::try_from(raw)?;
            run_webdriver(&cfg).await
        }
        Command::WebdriverUpdate(wd_args) => {
            apply_webdriver_overrides(&mut raw, wd_args);
            let cfg = ConfigFile::try_from(raw)?;
            manager_for(&cfg)?.update().await
        }
        Command::WebdriverStandalone => {
            let cfg = ConfigFile::try_from(raw)?;
            let manager = manager_for(&cfg)?;
            tokio::select! {
                res = manager.standalone() => res,
                _ = shutdown::ctrl_c() => {
                    info!("Ctrl-C received; stopping server");
                    Err(PipeError::Cancelled)
                }
            }
        }
        Command::Paths => {
            let cfg = ConfigFile::try_from(raw)?;
            print_paths(&cfg)
        }
    }
}

fn apply_global_overrides(raw: &mut RawConfigFile, args: &CliArgs) {
    if let Some(root) = &args.root {
        raw.paths.search_root = Some(root.clone());
    }
    if let Some(bin_dir) = &args.bin_dir {
        raw.paths.bin_dir = Some(bin_dir.clone());
    }
    if let Some(cli_path) = &args.cli_path {
        raw.paths.cli_path = Some(cli_path.clone());
    }
}

fn apply_run_overrides(raw: &mut RawConfigFile, args: &RunArgs) {
    if let Some(config_file) = &args.config_file {
        raw.protractor.config_file = Some(config_file.clone());
    }
    if let Some(node) = &args.node {
        raw.protractor.node = Some(node.clone());
    }
    if !args.args.is_empty() {
        raw.protractor.args = args.args.clone();
    }
    raw.protractor.debug |= args.debug;
}

fn apply_webdriver_overrides(raw: &mut RawConfigFile, args: &WebdriverArgs) {
    raw.webdriver.standalone |= args.standalone;
    if !args.browsers.is_empty() {
        raw.webdriver.browsers = args.browsers.clone();
    }
    if !args.manager_args.is_empty() {
        raw.webdriver.manager_args = args.manager_args.clone();
    }
}

fn manager_for(cfg: &ConfigFile) -> Result<WebdriverManager> {
    let resolver = cfg.resolver(&NativePlatform)?;
    Ok(
        WebdriverManager::new(resolver, Arc::new(RealFileSystem), Arc::new(TokioBackend))
            .with_options(cfg.webdriver_options()),
    )
}

async fn run_protractor(cfg: &ConfigFile, args: &RunArgs) -> Result<()> {
    let options = cfg.protractor_options()?;
    let resolver = cfg.resolver(&NativePlatform)?;

    let mut files: Vec<FileDescriptor> =
        args.specs.iter().cloned().map(FileDescriptor::from).collect();
    if args.stdin {
        files.extend(read_stdin_paths().await?.into_iter().map(FileDescriptor::from));
    }

    if args.dry_run {
        let mut collector = FileCollector::new();
        collector.extend(files);
        let command = protractor_command(&options, &resolver, &collector.finish());
        println!("{command}");
        return Ok(());
    }

    let stage = ProtractorStage::spawn(
        options,
        resolver,
        Arc::new(RealFileSystem),
        Arc::new(TokioBackend),
    );
    for file in files {
        stage.write(file).await?;
    }

    // Dropping the stage on Ctrl-C kills the runner.
    tokio::select! {
        res = stage.end() => res,
        _ = shutdown::ctrl_c() => {
            info!("Ctrl-C received; stopping test runner");
            Err(PipeError::Cancelled)
        }
    }
}

async fn read_stdin_paths() -> Result<Vec<PathBuf>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut paths = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            paths.push(PathBuf::from(line));
        }
    }
    Ok(paths)
}

async fn run_webdriver(cfg: &ConfigFile) -> Result<()> {
    let manager = manager_for(cfg)?;

    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let mut ctrl_c = tokio::spawn(async move {
        shutdown::ctrl_c().await;
        // The update phase may already be over; the server branch below
        // picks the signal up through the join handle instead.
        let _ = cancel_tx.send(());
    });

    let outcome = manager.update_then_start(cancel_rx).await?;
    let mut server = match outcome {
        TwoPhaseOutcome::Serving(server) => server,
        TwoPhaseOutcome::Cancelled => return Err(PipeError::Cancelled),
    };
    info!("webdriver server running; press Ctrl-C to stop");

    let state = tokio::select! {
        state = server.wait() => state?,
        Ok(()) = &mut ctrl_c => {
            info!("Ctrl-C received; stopping server");
            server.cancel();
            server.wait().await?
        }
    };

    match state {
        LaunchState::Finished(LaunchResult::Success) | LaunchState::Cancelled => Ok(()),
        LaunchState::Finished(LaunchResult::Failure(reason)) => Err(reason.into()),
    }
}

fn print_paths(cfg: &ConfigFile) -> Result<()> {
    let paths = cfg.resolver(&NativePlatform)?.paths();
    println!("bin_dir:      {}", paths.bin_dir.display());
    println!("cli_path:     {}", paths.cli_path.display());
    println!("manager_path: {}", paths.manager_path.display());
    Ok(())
}
