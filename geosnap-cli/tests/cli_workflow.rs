//! Integration tests for the geosnap binary.
//!
//! Each test points `HOME` at a temporary directory so the config file,
//! logs and record log never touch the real user profile.
//!
//! Run with: `cargo test -p geosnap-cli --test cli_workflow`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_geosnap"))
}

/// Run the CLI with `home` as the user's home directory.
fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(cli_binary())
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command")
}

/// Assert a command succeeded.
fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "{} failed:\nstdout: {}\nstderr: {}",
            context, stdout, stderr
        );
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Point the elevation service at a closed port and the barometer at a fake
/// IIO device reading `kpa`.
fn configure_offline(home: &Path, kpa: &str) {
    let iio = home.join("iio");
    let device = iio.join("iio:device0");
    fs::create_dir_all(&device).unwrap();
    fs::write(device.join("in_pressure_input"), kpa).unwrap();

    let settings = [
        ("elevation.endpoint", "http://127.0.0.1:9/api/v1/lookup".to_string()),
        ("elevation.timeout_ms", "2000".to_string()),
        ("pressure.sysfs_root", iio.display().to_string()),
        ("pressure.poll_interval_ms", "10".to_string()),
    ];
    for (key, value) in settings {
        let output = run_cli(home, &["config", "set", key, &value]);
        assert_success(&output, "config set");
    }
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_path_is_under_home() {
    let home = TempDir::new().unwrap();

    let output = run_cli(home.path(), &["config", "path"]);
    assert_success(&output, "config path");

    let expected = home.path().join(".geosnap").join("config.ini");
    assert_eq!(stdout(&output).trim(), expected.display().to_string());
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();

    let output = run_cli(home.path(), &["config", "set", "elevation.cache_capacity", "42"]);
    assert_success(&output, "config set");
    assert!(stdout(&output).contains("Set elevation.cache_capacity = 42 (was 300)"));

    let output = run_cli(home.path(), &["config", "get", "elevation.cache_capacity"]);
    assert_success(&output, "config get");
    assert_eq!(stdout(&output).trim(), "42");

    let output = run_cli(home.path(), &["config", "list"]);
    assert_success(&output, "config list");
    let listing = stdout(&output);
    assert!(listing.starts_with("Settings"));
    assert!(listing.contains("[elevation]"));
    assert!(listing.contains("  cache_capacity = 42  (default: 300)"));
    assert!(listing.contains("  timeout_ms = 5000\n"));
}

#[test]
fn test_config_rejects_unknown_key_and_bad_value() {
    let home = TempDir::new().unwrap();

    let output = run_cli(home.path(), &["config", "get", "elevation.nope"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown configuration key"));

    let output = run_cli(home.path(), &["config", "set", "elevation.cache_capacity", "0"]);
    assert_eq!(output.status.code(), Some(1));
}

// ============================================================================
// snapshot + log
// ============================================================================

#[test]
fn test_empty_log() {
    let home = TempDir::new().unwrap();

    let output = run_cli(home.path(), &["log", "list"]);
    assert_success(&output, "log list");
    assert!(stdout(&output).contains("No saved records."));

    let output = run_cli(home.path(), &["log", "show", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No saved record with id 1"));
}

#[test]
fn test_snapshot_save_show_delete() {
    let home = TempDir::new().unwrap();
    configure_offline(home.path(), "101.325\n");

    let output = run_cli(
        home.path(),
        &[
            "snapshot", "--lat", "-33.9", "--lon", "151.2", "--alt", "12.5", "--save", "Harbour",
        ],
    );
    assert_success(&output, "snapshot");
    let text = stdout(&output);
    assert!(text.starts_with("Geo Snapshot"));
    assert!(text.contains("Latitude:          -33.9"));
    assert!(text.contains("Terrain elevation: N/A"));
    assert!(text.contains("Device altitude:   12.5 m"));
    assert!(text.contains("Pressure:          1013.25 hPa"));
    assert!(text.contains("Saved as record #1"));

    let output = run_cli(home.path(), &["log", "list"]);
    assert_success(&output, "log list");
    let text = stdout(&output);
    assert!(text.starts_with("Saved Records"));
    assert!(text.contains("Harbour"));
    assert!(text.contains("1 record(s)"));

    let output = run_cli(home.path(), &["log", "show", "1"]);
    assert_success(&output, "log show");
    let text = stdout(&output);
    assert!(text.starts_with("Record #1: Harbour"));
    assert!(text.contains("Terrain elevation: N/A"));
    assert!(text.contains("Pressure:          1013.25 hPa"));
    assert!(text.contains("Back: geosnap log list"));

    let output = run_cli(home.path(), &["log", "delete", "1"]);
    assert_success(&output, "log delete");
    assert!(stdout(&output).contains("Deleted record #1: Harbour"));

    let output = run_cli(home.path(), &["log", "list"]);
    assert!(stdout(&output).contains("No saved records."));
}

#[test]
fn test_snapshot_without_barometer() {
    let home = TempDir::new().unwrap();
    configure_offline(home.path(), "101.325\n");

    let output = run_cli(
        home.path(),
        &["snapshot", "--lat", "31.2", "--lon", "121.5", "--no-pressure"],
    );
    assert_success(&output, "snapshot --no-pressure");
    let text = stdout(&output);
    assert!(text.contains("Pressure:          N/A"));
    assert!(text.contains("Device altitude:   N/A"));
    assert!(!text.contains("Saved as record"));
}
