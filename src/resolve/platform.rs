// src/resolve/platform.rs

//! Host capability query.
//!
//! Binary naming depends on the operating system identifier only; nothing
//! here probes the filesystem. Tests use [`FixedPlatform`] instead of
//! touching the environment.

use std::fmt::Debug;

/// Answers questions about the host that affect how binaries are named.
pub trait HostPlatform: Send + Sync + Debug {
    /// Operating system identifier, e.g. `"linux"`, `"macos"`, `"windows"`.
    fn os_id(&self) -> &str;

    /// Suffix appended to script shims in the dependency binary directory.
    fn executable_suffix(&self) -> &'static str {
        if self.os_id().starts_with("win") {
            ".cmd"
        } else {
            ""
        }
    }
}

/// The platform this process was compiled for.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePlatform;

impl HostPlatform for NativePlatform {
    fn os_id(&self) -> &str {
        std::env::consts::OS
    }
}

/// A platform with a fixed identifier.
#[derive(Debug, Clone)]
pub struct FixedPlatform {
    os: String,
}

impl FixedPlatform {
    pub fn new(os: impl Into<String>) -> Self {
        Self { os: os.into() }
    }

    pub fn windows() -> Self {
        Self::new("windows")
    }

    pub fn linux() -> Self {
        Self::new("linux")
    }
}

impl HostPlatform for FixedPlatform {
    fn os_id(&self) -> &str {
        &self.os
    }
}
