// tests/path_resolution.rs

use std::error::Error;
use std::path::PathBuf;

use protractor_pipe::errors::PipeError;
use protractor_pipe::fs::mock::MockFileSystem;
use protractor_pipe::fs::RealFileSystem;
use protractor_pipe::resolve::{FixedPlatform, HostPlatform, NativePlatform, PathResolver};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn bin_dir_is_node_modules_bin_under_cwd() -> TestResult {
    let cwd = std::env::current_dir()?;
    let resolver = PathResolver::from_current_dir()?;

    assert_eq!(resolver.bin_dir(), cwd.join("node_modules").join(".bin"));
    assert!(resolver.bin_dir().is_absolute());
    Ok(())
}

#[test]
fn cli_path_points_at_built_cli_js() -> TestResult {
    let cwd = std::env::current_dir()?;
    let resolver = PathResolver::from_current_dir()?;

    assert_eq!(
        resolver.cli_path(),
        cwd.join("node_modules")
            .join("protractor")
            .join("built")
            .join("cli.js")
    );
    Ok(())
}

#[test]
fn resolution_is_deterministic_across_calls() -> TestResult {
    let a = PathResolver::new("/srv/app", &FixedPlatform::linux())?;
    let b = PathResolver::new("/srv/app", &FixedPlatform::linux())?;

    let first = a.paths();
    for _ in 0..3 {
        assert_eq!(a.paths(), first);
    }
    assert_eq!(b.paths(), first);
    Ok(())
}

#[test]
fn relative_root_is_made_absolute() -> TestResult {
    let cwd = std::env::current_dir()?;
    let resolver = PathResolver::new("frontend", &FixedPlatform::linux())?;

    assert_eq!(resolver.search_root(), cwd.join("frontend"));
    assert_eq!(
        resolver.bin_dir(),
        cwd.join("frontend").join("node_modules").join(".bin")
    );
    Ok(())
}

#[test]
fn manager_gets_cmd_suffix_on_windows_only() -> TestResult {
    let unix = PathResolver::new("/srv/app", &FixedPlatform::linux())?;
    let mac = PathResolver::new("/srv/app", &FixedPlatform::new("macos"))?;
    let win = PathResolver::new("/srv/app", &FixedPlatform::windows())?;

    assert_eq!(
        unix.manager_path().file_name().and_then(|n| n.to_str()),
        Some("webdriver-manager")
    );
    assert_eq!(
        mac.manager_path().file_name().and_then(|n| n.to_str()),
        Some("webdriver-manager")
    );
    assert_eq!(
        win.manager_path().file_name().and_then(|n| n.to_str()),
        Some("webdriver-manager.cmd")
    );
    Ok(())
}

#[test]
fn platform_suffix_follows_os_identifier() {
    assert_eq!(FixedPlatform::new("win32").executable_suffix(), ".cmd");
    assert_eq!(FixedPlatform::windows().executable_suffix(), ".cmd");
    assert_eq!(FixedPlatform::linux().executable_suffix(), "");
    assert_eq!(FixedPlatform::new("freebsd").executable_suffix(), "");

    let expected = if cfg!(windows) { ".cmd" } else { "" };
    assert_eq!(NativePlatform.executable_suffix(), expected);
}

#[test]
fn overrides_replace_the_convention() -> TestResult {
    let resolver = PathResolver::new("/srv/app", &FixedPlatform::linux())?
        .with_bin_dir("tools/bin")
        .with_cli_path("/opt/protractor/cli.js");

    assert_eq!(resolver.bin_dir(), PathBuf::from("/srv/app/tools/bin"));
    assert_eq!(
        resolver.manager_path(),
        PathBuf::from("/srv/app/tools/bin/webdriver-manager")
    );
    assert_eq!(resolver.cli_path(), PathBuf::from("/opt/protractor/cli.js"));
    Ok(())
}

#[test]
fn missing_install_is_tool_not_installed() -> TestResult {
    let resolver = PathResolver::new("/srv/app", &FixedPlatform::linux())?;
    let fs = MockFileSystem::new();
    fs.add_dir("/srv/app/node_modules/.bin");

    let cli = resolver.cli_path();
    match resolver.ensure_installed(&cli, &fs) {
        Err(PipeError::ToolNotInstalled(path)) => assert_eq!(path, cli),
        other => panic!("expected ToolNotInstalled, got {other:?}"),
    }

    // A directory at the expected location does not count as installed.
    fs.add_dir(resolver.manager_path());
    assert!(matches!(
        resolver.ensure_installed(&resolver.manager_path(), &fs),
        Err(PipeError::ToolNotInstalled(_))
    ));
    Ok(())
}

#[test]
fn installed_layout_on_disk_is_found() -> TestResult {
    let dir = tempfile::tempdir()?;
    let resolver = PathResolver::new(dir.path(), &NativePlatform)?;

    let cli = resolver.cli_path();
    std::fs::create_dir_all(cli.parent().expect("cli.js has a parent"))?;
    std::fs::write(&cli, "// runner entry")?;

    resolver.ensure_installed(&cli, &RealFileSystem)?;
    assert!(resolver
        .ensure_installed(&resolver.manager_path(), &RealFileSystem)
        .is_err());
    Ok(())
}
