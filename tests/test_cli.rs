// CLI integration tests for worker-runtime
// Drives the binary against a settings file in a temp directory

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_worker-runtime"))
        .current_dir(dir.path())
        .env_remove("FUNCTIONS_WORKER_RUNTIME")
        .env_remove("WORKER_RUNTIME_SETTINGS")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Test that --help lists the subcommands
#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let output = run(&dir, &["--help"]);

    assert!(output.status.success(), "Help should exit with success");
    let text = stdout(&output);
    for subcommand in ["current", "set", "normalize", "aliases", "default-language"] {
        assert!(
            text.contains(subcommand),
            "Help should mention {}. Got: {}",
            subcommand,
            text
        );
    }
}

#[test]
fn test_set_then_current_round_trips() {
    let dir = TempDir::new().expect("failed to create temp dir");

    let set = run(&dir, &["set", "py"]);
    assert!(set.status.success(), "set failed: {:?}", set);
    assert_eq!(stdout(&set).trim(), "python");
    let stderr = String::from_utf8_lossy(&set.stderr);
    assert!(
        stderr.contains("Worker runtime 'python' has been set"),
        "advisory missing. Got: {}",
        stderr
    );

    let written = fs::read_to_string(dir.path().join("local.settings.json"))
        .expect("settings file should exist");
    assert!(written.contains("\"FUNCTIONS_WORKER_RUNTIME\": \"python\""), "{}", written);

    let current = run(&dir, &["current"]);
    assert!(current.status.success());
    assert_eq!(stdout(&current).trim(), "python");
}

#[test]
fn test_current_without_settings_is_none() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let output = run(&dir, &["current"]);

    assert!(output.status.success(), "detection should never fail");
    assert_eq!(stdout(&output).trim(), "None");
}

#[test]
fn test_current_prefers_environment_variable() {
    let dir = TempDir::new().expect("failed to create temp dir");
    assert!(run(&dir, &["set", "node"]).status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_worker-runtime"))
        .current_dir(dir.path())
        .env("FUNCTIONS_WORKER_RUNTIME", "dotnet-isolated")
        .arg("current")
        .output()
        .expect("Failed to execute command");

    assert_eq!(stdout(&output).trim(), "dotnet-isolated");
}

#[test]
fn test_set_unknown_runtime_fails_with_options() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let output = run(&dir, &["set", "cobol"]);

    assert!(!output.status.success(), "unknown runtime should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "Got: {}", stderr);
    assert!(stderr.contains("dotnet-isolated"), "Got: {}", stderr);
    assert!(
        !dir.path().join("local.settings.json").exists(),
        "nothing should be written on failure"
    );
}

#[test]
fn test_normalize_language_flag() {
    let dir = TempDir::new().expect("failed to create temp dir");

    let runtime = run(&dir, &["normalize", "TS"]);
    assert_eq!(stdout(&runtime).trim(), "node");

    let language = run(&dir, &["normalize", "--language", "TS"]);
    assert_eq!(stdout(&language).trim(), "typescript");
}

#[test]
fn test_default_language_for_java_fails() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let output = run(&dir, &["default-language", "java"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid worker for a template"), "Got: {}", stderr);
}

#[test]
fn test_list_shows_dotnet_models() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let output = run(&dir, &["list"]);

    let text = stdout(&output);
    assert!(text.contains("dotnet (in-process model)"), "{}", text);
    assert!(text.contains("dotnet (isolated worker model)"), "{}", text);
    assert!(!text.contains("java"), "{}", text);
}
