//! Common test utilities for TUI tests.

use std::path::PathBuf;
use std::process::Command;

/// Path to the fixture collection, nested under `/data/users`.
pub fn users_fixture() -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("users.json");
    path.display().to_string()
}

/// Run typeahead with the given arguments.
/// Uses the binary cargo built for this test target.
pub fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_typeahead"))
        .args(args)
        .env_remove("TYPEAHEAD_ITEMS")
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

/// A config path that does not exist, so user config never leaks into tests.
pub fn no_config() -> String {
    std::env::temp_dir()
        .join("typeahead-tests-absent")
        .join("config.toml")
        .display()
        .to_string()
}

/// Run typeahead headless over the users fixture with the given events.
pub fn run_events(events: &str, extra: &[&str]) -> (i32, String, String) {
    let fixture = users_fixture();
    let config = no_config();
    let mut args = vec![
        fixture.as_str(),
        "--config",
        config.as_str(),
        "--pointer",
        "/data/users",
        "--select-field",
        "name",
        "--headless",
        "--events",
        events,
    ];
    args.extend_from_slice(extra);
    run(&args)
}
