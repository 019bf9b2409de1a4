#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use protractor_pipe::config::{ConfigFile, RawConfigFile};
use protractor_pipe::fs::mock::MockFileSystem;
use protractor_pipe::fs::FileSystem;
use protractor_pipe::pipeline::{ProtractorOptions, ProtractorStage};
use protractor_pipe::resolve::{FixedPlatform, HostPlatform, PathResolver};
use protractor_pipe::webdriver::{WebdriverManager, WebdriverOptions};

use crate::fake_backend::FakeBackend;

pub const FIXTURE_ROOT: &str = "/project";

/// A resolver, an in-memory filesystem and a fake backend that fit together.
pub struct Fixture {
    pub resolver: PathResolver,
    pub fs: MockFileSystem,
    pub backend: FakeBackend,
}

impl Fixture {
    /// Runner and driver manager both installed under `/project`.
    pub fn installed(backend: FakeBackend) -> Self {
        let fixture = Self::not_installed(backend);
        fixture.fs.add_file(fixture.resolver.cli_path());
        fixture.fs.add_file(fixture.resolver.manager_path());
        fixture
    }

    /// Empty project: nothing under `node_modules`.
    pub fn not_installed(backend: FakeBackend) -> Self {
        Self::on_platform(backend, &FixedPlatform::linux())
    }

    pub fn on_platform(backend: FakeBackend, platform: &dyn HostPlatform) -> Self {
        let resolver =
            PathResolver::new(FIXTURE_ROOT, platform).expect("fixture root must resolve");
        let fs = MockFileSystem::new();
        fs.add_dir(FIXTURE_ROOT);
        Self {
            resolver,
            fs,
            backend,
        }
    }

    pub fn fs_arc(&self) -> Arc<dyn FileSystem> {
        Arc::new(self.fs.clone())
    }

    pub fn stage(&self, options: ProtractorOptions) -> ProtractorStage {
        ProtractorStage::spawn(
            options,
            self.resolver.clone(),
            self.fs_arc(),
            Arc::new(self.backend.clone()),
        )
    }

    pub fn manager(&self, options: WebdriverOptions) -> WebdriverManager {
        WebdriverManager::new(
            self.resolver.clone(),
            self.fs_arc(),
            Arc::new(self.backend.clone()),
        )
        .with_options(options)
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn config_file(mut self, path: &str) -> Self {
        self.config.protractor.config_file = Some(PathBuf::from(path));
        self
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.config.protractor.args.push(arg.to_string());
        self
    }

    pub fn debug(mut self, val: bool) -> Self {
        self.config.protractor.debug = val;
        self
    }

    pub fn search_root(mut self, path: &str) -> Self {
        self.config.paths.search_root = Some(PathBuf::from(path));
        self
    }

    pub fn bin_dir(mut self, path: &str) -> Self {
        self.config.paths.bin_dir = Some(PathBuf::from(path));
        self
    }

    pub fn cli_path(mut self, path: &str) -> Self {
        self.config.paths.cli_path = Some(PathBuf::from(path));
        self
    }

    pub fn browser(mut self, name: &str) -> Self {
        self.config.webdriver.browsers.push(name.to_string());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
