//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway config directory and
//! verify outputs.

use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_intervalroom"))
        .args(args)
        .env("INTERVALROOM_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_plan_json_matches_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &[
            "plan",
            "--warmup",
            "0",
            "--work",
            "30",
            "--rest",
            "10",
            "--intervals",
            "3",
            "--json",
        ],
    );
    assert_eq!(code, 0, "plan failed: {stderr}");

    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["total_secs"], 110);
    assert_eq!(plan["total"], "01:50");
    let labels: Vec<&str> = plan["phases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec!["Work 1/3", "Rest 1/2", "Work 2/3", "Rest 2/2", "Work 3/3"]
    );
}

#[test]
fn test_plan_clamps_garbage_input() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &[
            "plan",
            "--warmup",
            "-5",
            "--work",
            "abc",
            "--intervals",
            "0",
            "--json",
        ],
    );
    assert_eq!(code, 0);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["config"]["work_secs"], 5);
    assert_eq!(plan["config"]["intervals"], 1);
    assert_eq!(plan["phases"].as_array().unwrap().len(), 1);
}

#[test]
fn test_config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "workout.intervals", "4"]);
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "workout.intervals"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "4");

    let (stdout, _, _) = run_cli(dir.path(), &["plan", "--json"]);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["config"]["intervals"], 4);
}

#[test]
fn test_plan_falls_back_to_defaults_and_keeps_broken_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let bytes = b"[workout]\nintervals = 3\n# caf\xe9\n";
    std::fs::write(&path, bytes).unwrap();

    let (stdout, stderr, code) = run_cli(dir.path(), &["plan", "--json"]);
    assert_eq!(code, 0, "plan failed: {stderr}");
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["config"]["intervals"], 8);
    assert!(stderr.contains("Failed to load config"));
    assert_eq!(std::fs::read(&path).unwrap(), bytes);

    let (_, stderr, code) = run_cli(dir.path(), &["config", "list"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to load configuration"));
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "workout.tempo", "4"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_run_completes_short_workout() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &[
            "run",
            "--warmup",
            "0",
            "--work",
            "5",
            "--rest",
            "0",
            "--intervals",
            "1",
            "--no-sound",
        ],
    );
    assert_eq!(code, 0, "run failed: {stderr}");
    assert!(stdout.contains("Completed"));
    assert!(stdout.contains("Nice! Session completed."));
}
