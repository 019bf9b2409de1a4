// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::{PipeError, Result};
use crate::pipeline::ProtractorOptions;
use crate::resolve::{HostPlatform, PathResolver};
use crate::webdriver::WebdriverOptions;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [protractor]
/// config_file = "e2e/protractor.conf.js"
/// args = ["--browser", "chrome"]
///
/// [paths]
/// search_root = "frontend"
///
/// [webdriver]
/// standalone = true
/// browsers = ["chrome"]
/// ```
///
/// All sections are optional. `config_file` is only required when the test
/// runner is actually launched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub protractor: ProtractorSection,

    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub webdriver: WebdriverSection,
}

/// `[protractor]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProtractorSection {
    /// The runner's own configuration file.
    pub config_file: Option<PathBuf>,

    /// Pass-through arguments.
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub debug: bool,

    /// Interpreter for the runner's entry script (default `node`).
    pub node: Option<PathBuf>,
}

/// `[paths]` section. Unset values follow the conventional layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsSection {
    /// Directory the layout is resolved from (default: current directory).
    pub search_root: Option<PathBuf>,
    pub bin_dir: Option<PathBuf>,
    pub cli_path: Option<PathBuf>,
}

/// `[webdriver]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebdriverSection {
    #[serde(default)]
    pub standalone: bool,

    #[serde(default)]
    pub browsers: Vec<String>,

    #[serde(default)]
    pub manager_args: Vec<String>,
}

/// Validated configuration. Obtain it via `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    protractor: ProtractorSection,
    paths: PathsSection,
    webdriver: WebdriverSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        protractor: ProtractorSection,
        paths: PathsSection,
        webdriver: WebdriverSection,
    ) -> Self {
        Self {
            protractor,
            paths,
            webdriver,
        }
    }

    pub fn protractor(&self) -> &ProtractorSection {
        &self.protractor
    }

    pub fn paths(&self) -> &PathsSection {
        &self.paths
    }

    pub fn webdriver(&self) -> &WebdriverSection {
        &self.webdriver
    }

    /// Launch options for the test runner.
    ///
    /// Fails with `ConfigError` when no `config_file` was given.
    pub fn protractor_options(&self) -> Result<ProtractorOptions> {
        let config_file = self.protractor.config_file.clone().ok_or_else(|| {
            PipeError::ConfigError(
                "[protractor].config_file is required to launch the test runner".to_string(),
            )
        })?;

        let mut options = ProtractorOptions::new(config_file)
            .with_args(self.protractor.args.iter().cloned())
            .with_debug(self.protractor.debug);

        if let Some(node) = &self.protractor.node {
            options = options.with_node(node);
        }

        Ok(options)
    }

    pub fn webdriver_options(&self) -> WebdriverOptions {
        WebdriverOptions {
            standalone: self.webdriver.standalone,
            browsers: self.webdriver.browsers.clone(),
            manager_args: self.webdriver.manager_args.clone(),
        }
    }

    /// Resolver honouring the `[paths]` overrides.
    pub fn resolver(&self, platform: &dyn HostPlatform) -> Result<PathResolver> {
        let root = match &self.paths.search_root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };

        let mut resolver = PathResolver::new(root, platform)?;
        if let Some(bin_dir) = &self.paths.bin_dir {
            resolver = resolver.with_bin_dir(bin_dir);
        }
        if let Some(cli_path) = &self.paths.cli_path {
            resolver = resolver.with_cli_path(cli_path);
        }
        Ok(resolver)
    }
}
