// src/config/validate.rs

use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PipeError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PipeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.protractor, raw.paths, raw.webdriver))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_protractor(cfg)?;
    validate_paths(cfg)?;
    validate_webdriver(cfg)?;
    Ok(())
}

fn validate_protractor(cfg: &RawConfigFile) -> Result<()> {
    if let Some(config_file) = &cfg.protractor.config_file {
        ensure_non_empty_path("[protractor].config_file", config_file)?;
    }
    if let Some(node) = &cfg.protractor.node {
        ensure_non_empty_path("[protractor].node", node)?;
    }
    Ok(())
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    let paths = &cfg.paths;
    for (key, value) in [
        ("[paths].search_root", &paths.search_root),
        ("[paths].bin_dir", &paths.bin_dir),
        ("[paths].cli_path", &paths.cli_path),
    ] {
        if let Some(path) = value {
            ensure_non_empty_path(key, path)?;
        }
    }
    Ok(())
}

fn validate_webdriver(cfg: &RawConfigFile) -> Result<()> {
    for browser in cfg.webdriver.browsers.iter() {
        // Browsers are turned into `--<name>`; a leading dash would double it.
        if browser.trim().is_empty() || browser.starts_with('-') {
            return Err(PipeError::ConfigError(format!(
                "[webdriver].browsers contains invalid browser name '{}'",
                browser
            )));
        }
    }
    Ok(())
}

fn ensure_non_empty_path(key: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(PipeError::ConfigError(format!("{key} must not be empty")));
    }
    Ok(())
}
