// src/fs/mod.rs

//! Filesystem probing used to confirm a tool is actually installed.
//!
//! Path resolution is pure; only the installation check touches the disk,
//! and it does so through [`FileSystem`] so tests can supply a layout.

use std::fmt::Debug;
use std::path::Path;

pub mod mock;

/// Minimal read-only view of the filesystem.
pub trait FileSystem: Send + Sync + Debug {
    fn is_file(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
