//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. The dev
//! settings directory keeps them away from a real user's config.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "ringside-cli", "--"])
        .args(args)
        .env("RINGSIDE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Like `run_cli`, but with the given bytes piped to stdin.
fn run_cli_with_stdin(args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = Command::new("cargo")
        .args(["run", "-p", "ringside-cli", "--"])
        .args(args)
        .env("RINGSIDE_ENV", "dev")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write to CLI stdin");

    let output = child
        .wait_with_output()
        .expect("Failed to wait for CLI command");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_list() {
    let output = run_cli(&["list"]);
    assert_eq!(output.2, 0, "List failed: {}", output.1);
    assert!(output.0.contains("Standard"));
    assert!(output.0.contains("Round"));
    assert!(output.0.contains("Interval"));
}

#[test]
fn test_list_json() {
    let output = run_cli(&["list", "--json"]);
    assert_eq!(output.2, 0, "List JSON failed: {}", output.1);
    let parsed: serde_json::Value =
        serde_json::from_str(&output.0).expect("List output is not JSON");
    let entries = parsed.as_array().expect("List output is not an array");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["screen"], "StandardTimer");
    assert_eq!(entries[1]["screen"], "RoundTimer");
    assert_eq!(entries[2]["screen"], "IntervalTimer");
}

#[test]
fn test_version() {
    let output = run_cli(&["--version"]);
    assert_eq!(output.2, 0, "Version failed: {}", output.1);
    assert!(output.0.contains("ringside"));
}

#[test]
fn test_standard_plan_json() {
    let output = run_cli(&["standard", "--duration", "5", "--plan"]);
    assert_eq!(output.2, 0, "Standard plan failed: {}", output.1);
    let plan: serde_json::Value =
        serde_json::from_str(&output.0).expect("Plan output is not JSON");
    assert_eq!(plan["kind"], "standard");
    assert_eq!(plan["total_rounds"], 1);
    let segments = plan["segments"].as_array().expect("Plan has no segments");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0]["duration_secs"], 5);
    assert_eq!(segments[0]["kind"], "round");
}

#[test]
fn test_round_plan_interleaves_rests() {
    let output = run_cli(&[
        "round", "--duration", "3", "--rounds", "2", "--rest", "2", "--plan",
    ]);
    assert_eq!(output.2, 0, "Round plan failed: {}", output.1);
    let plan: serde_json::Value =
        serde_json::from_str(&output.0).expect("Plan output is not JSON");
    let segments = plan["segments"].as_array().expect("Plan has no segments");
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0]["kind"], "round");
    assert_eq!(segments[1]["kind"], "rest");
    assert_eq!(segments[1]["duration_secs"], 2);
    assert_eq!(segments[2]["kind"], "round");
}

#[test]
fn test_round_plan_omits_zero_rest() {
    let output = run_cli(&[
        "round", "--duration", "3", "--rounds", "2", "--rest", "0", "--plan",
    ]);
    assert_eq!(output.2, 0, "Round plan failed: {}", output.1);
    let plan: serde_json::Value =
        serde_json::from_str(&output.0).expect("Plan output is not JSON");
    let segments = plan["segments"].as_array().expect("Plan has no segments");
    assert_eq!(segments.len(), 2);
    assert!(segments.iter().all(|s| s["kind"] == "round"));
}

#[test]
fn test_round_plan_no_rest_flag() {
    let output = run_cli(&["round", "--rounds", "3", "--no-rest", "--plan"]);
    assert_eq!(output.2, 0, "Round plan failed: {}", output.1);
    let plan: serde_json::Value =
        serde_json::from_str(&output.0).expect("Plan output is not JSON");
    let segments = plan["segments"].as_array().expect("Plan has no segments");
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|s| s["kind"] == "round"));
}

#[test]
fn test_interval_plan_json() {
    let output = run_cli(&[
        "interval",
        "--step",
        "sprint:20",
        "--step",
        "recover:10:rest",
        "--repeats",
        "2",
        "--plan",
    ]);
    assert_eq!(output.2, 0, "Interval plan failed: {}", output.1);
    let plan: serde_json::Value =
        serde_json::from_str(&output.0).expect("Plan output is not JSON");
    assert_eq!(plan["kind"], "interval");
    assert_eq!(plan["total_rounds"], 2);
    let segments = plan["segments"].as_array().expect("Plan has no segments");
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0]["label"], "sprint");
    assert_eq!(segments[1]["kind"], "rest");
    assert_eq!(segments[2]["round"], 2);
    assert_eq!(segments[3]["kind"], "rest");
}

#[test]
fn test_standard_rejects_zero_duration() {
    let output = run_cli(&["standard", "--duration", "0", "--plan"]);
    assert_ne!(output.2, 0, "Zero duration was accepted");
    assert!(output.1.contains("error:"));
}

#[test]
fn test_standard_rejects_garbage_duration() {
    let output = run_cli(&["standard", "--duration", "soon", "--plan"]);
    assert_ne!(output.2, 0, "Garbage duration was accepted");
    assert!(output.1.contains("error:"));
}

#[test]
fn test_round_rejects_zero_rounds() {
    let output = run_cli(&["round", "--rounds", "0", "--plan"]);
    assert_ne!(output.2, 0, "Zero rounds was accepted");
    assert!(output.1.contains("error:"));
}

#[test]
fn test_interval_requires_a_step() {
    let output = run_cli(&["interval", "--plan"]);
    assert_ne!(output.2, 0, "Interval without steps was accepted");
}

#[test]
fn test_interval_rejects_bad_step_spec() {
    let output = run_cli(&["interval", "--step", "sprint", "--plan"]);
    assert_ne!(output.2, 0, "Bad step spec was accepted");
    assert!(output.1.contains("error:"));
}

#[test]
fn test_interval_rejects_all_rest_steps() {
    let output = run_cli(&["interval", "--step", "chill:10:rest", "--plan"]);
    assert_ne!(output.2, 0, "All-rest set was accepted");
    assert!(output.1.contains("work step"));
}

#[test]
fn test_config_list() {
    let output = run_cli(&["config", "list"]);
    assert_eq!(output.2, 0, "Config list failed: {}", output.1);
    let parsed: serde_json::Value =
        serde_json::from_str(&output.0).expect("Config list output is not JSON");
    assert!(parsed["alerts"]["sound"].is_boolean());
}

#[test]
fn test_config_set_then_get() {
    let set_output = run_cli(&["config", "set", "alerts.vibration", "true"]);
    assert_eq!(set_output.2, 0, "Config set failed: {}", set_output.1);
    assert!(set_output.0.contains("ok"));

    let get_output = run_cli(&["config", "get", "alerts.vibration"]);
    assert_eq!(get_output.2, 0, "Config get failed: {}", get_output.1);
    assert_eq!(get_output.0.trim(), "true");
}

#[test]
fn test_config_get_unknown_key() {
    let output = run_cli(&["config", "get", "alerts.volume"]);
    assert_ne!(output.2, 0, "Unknown key was accepted");
    assert!(output.1.contains("unknown key"));
}

#[test]
fn test_standard_run_completes() {
    let output = run_cli(&[
        "standard",
        "--duration",
        "2",
        "--tick-ms",
        "25",
        "--auto-ack",
        "--quiet",
    ]);
    assert_eq!(output.2, 0, "Standard run failed: {}", output.1);
    assert!(output.0.contains("Time's up"));
}

#[test]
fn test_round_run_announces_rounds() {
    let output = run_cli(&[
        "round",
        "--duration",
        "1",
        "--rounds",
        "2",
        "--rest",
        "1",
        "--tick-ms",
        "25",
        "--auto-ack",
        "--quiet",
    ]);
    assert_eq!(output.2, 0, "Round run failed: {}", output.1);
    assert!(output.0.contains("Rest"));
    assert!(output.0.contains("Round 2/2"));
    assert!(output.0.contains("Time's up"));
}

#[test]
fn test_json_run_emits_line_json() {
    let output = run_cli(&[
        "standard",
        "--duration",
        "1",
        "--tick-ms",
        "25",
        "--auto-ack",
        "--quiet",
        "--json",
    ]);
    assert_eq!(output.2, 0, "JSON run failed: {}", output.1);
    for line in output.0.lines() {
        serde_json::from_str::<serde_json::Value>(line)
            .unwrap_or_else(|e| panic!("Non-JSON line {line:?}: {e}"));
    }
    assert!(output.0.contains("\"TimerStarted\""));
    assert!(output.0.contains("\"TimerCompleted\""));
    assert!(output.0.contains("\"AlertAcknowledged\""));
}

#[test]
fn test_json_run_rings_the_bell_on_stderr() {
    let output = run_cli(&[
        "standard",
        "--duration",
        "1",
        "--tick-ms",
        "25",
        "--auto-ack",
        "--json",
    ]);
    assert_eq!(output.2, 0, "JSON run failed: {}", output.1);
    assert!(
        !output.0.contains('\x07'),
        "Bell byte corrupts the JSON stream"
    );
    for line in output.0.lines() {
        serde_json::from_str::<serde_json::Value>(line)
            .unwrap_or_else(|e| panic!("Non-JSON line {line:?}: {e}"));
    }
    assert!(output.1.contains('\x07'), "Completion bell did not ring");
}

#[test]
fn test_quit_from_stdin() {
    let output = run_cli_with_stdin(&["standard", "--duration", "60", "--quiet"], "q\n");
    assert_eq!(output.2, 0, "Quit run failed: {}", output.1);
}

#[test]
fn test_reset_then_start_restarts_the_run() {
    let output = run_cli_with_stdin(
        &[
            "standard",
            "--duration",
            "2",
            "--tick-ms",
            "25",
            "--auto-ack",
            "--quiet",
        ],
        "x\ns\n",
    );
    assert_eq!(output.2, 0, "Restarted run failed: {}", output.1);
    assert!(output.0.contains("s start"), "Controls line does not list s");
    assert!(output.0.contains("Reset."));
    assert!(output.0.contains("Time's up"));
}
