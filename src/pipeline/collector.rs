// src/pipeline/collector.rs

//! Buffering of incoming file descriptors.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::types::FileDescriptor;

/// Accumulates paths in arrival order until the input ends.
///
/// Descriptors are consumed, not forwarded. Duplicates are kept as they
/// arrived.
#[derive(Debug, Default)]
pub struct FileCollector {
    paths: Vec<PathBuf>,
}

/// The finalized, immutable list of collected paths.
///
/// Only obtainable through [`FileCollector::finish`], so a partially
/// collected list can never reach the argument builder. An empty list is a
/// valid result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecList {
    paths: Vec<PathBuf>,
}

impl FileCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, file: FileDescriptor) {
        trace!(path = %file.path.display(), "collected file");
        self.paths.push(file.path);
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Finalize on end-of-input. Consumes the collector.
    pub fn finish(self) -> SpecList {
        debug!(count = self.paths.len(), "input ended; spec list finalized");
        SpecList { paths: self.paths }
    }

    /// Drain `rx` until every sender is gone, then finalize.
    ///
    /// Closing the channel is the end-of-input signal.
    pub async fn drain(mut rx: mpsc::Receiver<FileDescriptor>) -> SpecList {
        let mut collector = Self::new();
        while let Some(file) = rx.recv().await {
            collector.accept(file);
        }
        collector.finish()
    }
}

impl Extend<FileDescriptor> for FileCollector {
    fn extend<T: IntoIterator<Item = FileDescriptor>>(&mut self, iter: T) {
        for file in iter {
            self.accept(file);
        }
    }
}

impl SpecList {
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }
}
