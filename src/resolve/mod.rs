// src/resolve/mod.rs

//! Locating the installed test runner and driver manager.
//!
//! Everything is derived from an explicit search root (normally the current
//! working directory) using the conventional dependency layout:
//!
//! - `<root>/node_modules/.bin` holds the executable shims,
//! - `<root>/node_modules/protractor/built/cli.js` is the runner's entry
//!   script,
//! - `<bin_dir>/webdriver-manager[.cmd]` is the driver manager.
//!
//! Resolution never falls back to a globally installed copy. A missing
//! install is reported by [`PathResolver::ensure_installed`] as
//! [`PipeError::ToolNotInstalled`].

pub mod platform;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{PipeError, Result};
use crate::fs::FileSystem;

pub use platform::{FixedPlatform, HostPlatform, NativePlatform};

const DEPENDENCY_DIR: &str = "node_modules";
const BIN_DIR: &str = ".bin";
const RUNNER_PACKAGE: &str = "protractor";
const MANAGER_BINARY: &str = "webdriver-manager";

/// All resolved locations, mostly for display (`paths` subcommand, dry run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub bin_dir: PathBuf,
    pub cli_path: PathBuf,
    pub manager_path: PathBuf,
}

/// Pure resolver of tool locations relative to a search root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    search_root: PathBuf,
    bin_dir: Option<PathBuf>,
    cli_path: Option<PathBuf>,
    exe_suffix: &'static str,
}

impl PathResolver {
    /// Create a resolver rooted at `search_root`.
    ///
    /// A relative root is made absolute against the current directory once,
    /// here; every later lookup is a pure path join.
    pub fn new(search_root: impl AsRef<Path>, platform: &dyn HostPlatform) -> Result<Self> {
        let search_root = std::path::absolute(search_root.as_ref())?;
        Ok(Self {
            search_root,
            bin_dir: None,
            cli_path: None,
            exe_suffix: platform.executable_suffix(),
        })
    }

    /// Resolver rooted at the current working directory on the native host.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::new(cwd, &NativePlatform)
    }

    /// Use an explicit dependency binary directory instead of the convention.
    ///
    /// Relative overrides are taken relative to the search root.
    pub fn with_bin_dir(mut self, bin_dir: impl AsRef<Path>) -> Self {
        self.bin_dir = Some(self.search_root.join(bin_dir));
        self
    }

    /// Use an explicit runner entry script instead of the convention.
    pub fn with_cli_path(mut self, cli_path: impl AsRef<Path>) -> Self {
        self.cli_path = Some(self.search_root.join(cli_path));
        self
    }

    pub fn search_root(&self) -> &Path {
        &self.search_root
    }

    /// Directory containing locally installed executable shims.
    pub fn bin_dir(&self) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.clone(),
            None => self.search_root.join(DEPENDENCY_DIR).join(BIN_DIR),
        }
    }

    /// Absolute path of the runner's command-line entry script.
    pub fn cli_path(&self) -> PathBuf {
        match &self.cli_path {
            Some(path) => path.clone(),
            None => self
                .search_root
                .join(DEPENDENCY_DIR)
                .join(RUNNER_PACKAGE)
                .join("built")
                .join("cli.js"),
        }
    }

    /// Absolute path of the driver manager shim, with the host suffix.
    pub fn manager_path(&self) -> PathBuf {
        self.bin_dir()
            .join(format!("{MANAGER_BINARY}{}", self.exe_suffix))
    }

    pub fn paths(&self) -> ToolPaths {
        ToolPaths {
            bin_dir: self.bin_dir(),
            cli_path: self.cli_path(),
            manager_path: self.manager_path(),
        }
    }

    /// Fail with `ToolNotInstalled` unless `path` exists as a file.
    pub fn ensure_installed(&self, path: &Path, fs: &dyn FileSystem) -> Result<()> {
        if fs.is_file(path) {
            debug!(path = %path.display(), "tool found");
            Ok(())
        } else {
            Err(PipeError::ToolNotInstalled(path.to_path_buf()))
        }
    }
}
