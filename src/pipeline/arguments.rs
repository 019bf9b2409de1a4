// src/pipeline/arguments.rs

//! Argument vector construction for the test runner.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const SPECS_FLAG: &str = "--specs";
pub const SPEC_SEPARATOR: &str = ",";

/// Build `[config_file, (--specs <joined>), ...extra_args]`.
///
/// The `--specs` pair is left out entirely when `specs` is empty; the
/// runner would otherwise treat an empty value as a spec pattern. Paths are
/// forwarded as raw OS strings, so names that are not valid UTF-8 reach the
/// runner unchanged. Extra arguments are forwarded verbatim and in order.
pub fn build_arguments(
    config_file: impl AsRef<Path>,
    specs: &[PathBuf],
    extra_args: &[String],
) -> Vec<OsString> {
    let mut args = Vec::with_capacity(3 + extra_args.len());
    args.push(config_file.as_ref().as_os_str().to_os_string());

    if !specs.is_empty() {
        args.push(OsString::from(SPECS_FLAG));
        args.push(join_specs(specs));
    }

    args.extend(extra_args.iter().map(OsString::from));
    args
}

fn join_specs(specs: &[PathBuf]) -> OsString {
    let mut joined = OsString::new();
    for (i, spec) in specs.iter().enumerate() {
        if i > 0 {
            joined.push(SPEC_SEPARATOR);
        }
        joined.push(spec);
    }
    joined
}
