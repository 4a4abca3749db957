//! Integration tests for headless mode.

use super::common::{no_config, run, run_events, users_fixture};

#[test]
fn test_headless_basic_execution() {
    let (code, stdout, _) = run_events("key:esc", &[]);

    assert_eq!(code, 0, "Expected exit code 0");
    assert!(
        stdout.contains("Events: 1 executed"),
        "Should show events executed"
    );
    assert!(stdout.contains("5 items [users.json]"));
}

#[test]
fn test_headless_type_event() {
    let (code, stdout, _) = run_events("type:al", &["--output", "json"]);

    assert_eq!(code, 0);
    assert!(stdout.contains(r#""input_text": "al""#));
    assert!(stdout.contains(r#""result_count": 2"#));
    assert!(stdout.contains(r#""highlight": null"#));
    assert!(stdout.contains(r#""listener_count": 1"#));
}

#[test]
fn test_headless_assertion_pass() {
    let (code, stdout, _) = run_events(
        "type:al,assert:contains:Alice Moreau",
        &["--output", "json"],
    );

    assert_eq!(code, 0);
    assert!(stdout.contains(r#""passed": 1"#));
    assert!(stdout.contains(r#""failed": 0"#));
}

#[test]
fn test_headless_assertion_fail() {
    let (code, stdout, _) = run_events(
        "type:al,assert:contains:Dmitri",
        &["--output", "json"],
    );

    assert_eq!(code, 1, "Should exit with code 1 on assertion failure");
    assert!(stdout.contains(r#""passed": 0"#));
    assert!(stdout.contains(r#""failed": 1"#));
}

#[test]
fn test_headless_frames_output() {
    let (code, stdout, _) = run_events("type:a,type:l", &["--output", "frames"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("--- 0 initial | query \"\" | panel open"));
    assert!(stdout.contains("--- 1 type:a | query \"a\" | panel open | highlight none | 5 results"));
    assert!(stdout.contains("--- 2 type:l | query \"al\" | panel open | highlight none | 2 results"));
    assert!(stdout.contains("3 frames, 0 passed, 0 failed"));
}

#[test]
fn test_headless_custom_size() {
    let (code, stdout, _) = run_events("resize:100x30", &["--size", "120x40", "--output", "json"]);

    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["events_executed"], 1);
}

#[test]
fn test_headless_requires_events_or_script() {
    let fixture = users_fixture();
    let config = no_config();
    let (code, stdout, stderr) = run(&[&fixture, "--config", &config, "--headless"]);

    assert_eq!(code, 1, "Should fail without events or script");
    let combined = format!("{}{}", stdout, stderr);
    assert!(
        combined.contains("requires --events or --script"),
        "Should show error message. Got: {}",
        combined
    );
}

#[test]
fn test_missing_items_file_is_reported() {
    let config = no_config();
    let (code, _, stderr) = run(&[
        "/nonexistent/users.json",
        "--config",
        &config,
        "--headless",
        "--events",
        "key:esc",
    ]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Data Error"), "Got: {}", stderr);
}

#[test]
fn test_wrong_pointer_is_reported() {
    let fixture = users_fixture();
    let config = no_config();
    let (code, _, stderr) = run(&[
        &fixture,
        "--config",
        &config,
        "--pointer",
        "/data/nobody",
        "--headless",
        "--events",
        "key:esc",
    ]);

    assert_eq!(code, 1);
    assert!(stderr.contains("/data/nobody"), "Got: {}", stderr);
}

#[test]
fn test_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("pick-alan.txt");
    std::fs::write(
        &script,
        "# Find Alan and pick him\ntype:ala\nkey:down\nkey:enter\nassert:state:selected_key=3\n",
    )
    .unwrap();

    let fixture = users_fixture();
    let config = no_config();
    let script = script.display().to_string();
    let (code, stdout, _) = run(&[
        &fixture,
        "--config",
        &config,
        "--pointer",
        "/data/users",
        "--headless",
        "--script",
        &script,
        "--output",
        "json",
    ]);

    assert_eq!(code, 0, "stdout: {}", stdout);
    assert!(stdout.contains(r#""selected_key": "3""#));
}

#[test]
fn test_config_file_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        r#"
[autocomplete]
no_result_text = "Nobody by that name"

[data]
pointer = "/data/users"

[display]
template = ["{name} <{email}>"]
"#,
    )
    .unwrap();

    let fixture = users_fixture();
    let config = config.display().to_string();
    let (code, stdout, _) = run(&[
        &fixture,
        "--config",
        &config,
        "--headless",
        "--events",
        "type:al,assert:contains:Alan Price <alan@example.com>,key:backspace,type:qq",
    ]);

    assert_eq!(code, 0, "stdout: {}", stdout);
    assert!(stdout.contains("Nobody by that name"));
}
