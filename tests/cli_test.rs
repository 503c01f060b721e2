// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors
// ABOUTME: Integration tests for the velotune binary
// ABOUTME: Tests help output, JSON results on stdout and error documents on stderr

//! Integration tests for the velotune CLI.
//!
//! These tests run the compiled binary and parse what it prints.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use velotune::BikeSetup;

/// Helper to run CLI command and capture output
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_velotune"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    (exit_code, stdout, stderr)
}

fn write_setup(dir: &TempDir, name: &str, setup: &BikeSetup) -> String {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(setup).unwrap()).unwrap();
    path_str(&path)
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_cli_help_lists_commands() {
    let (exit_code, stdout, _stderr) = run_cli(&["--help"]);

    assert_eq!(exit_code, 0, "CLI help should exit with 0");
    for command in ["compare", "chain-length", "chainline", "tire-pressure", "suspension"] {
        assert!(stdout.contains(command), "Help should mention '{command}'");
    }
}

#[test]
fn test_cli_chain_length_prints_json() {
    let (exit_code, stdout, _stderr) =
        run_cli(&["chain-length", "--chainring", "32", "--cog", "52", "--chainstay", "435"]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["links"], 76);
    assert_eq!(json["min_links"], 74);
}

#[test]
fn test_cli_invalid_parameter_reports_error_document() {
    let (exit_code, stdout, stderr) =
        run_cli(&["chain-length", "--chainring", "32", "--cog", "52", "--chainstay", "0"]);

    assert_ne!(exit_code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("\"INVALID_PARAMETER\""));
    assert!(stderr.contains("chainstay_length_mm"));
}

#[test]
fn test_cli_chainline_lenient_frame() {
    let (exit_code, stdout, _stderr) = run_cli(&[
        "chainline",
        "--chainring-offset",
        "43.5",
        "--chainstay",
        "410",
        "--frame",
        "Road",
    ]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["direction"], "aligned");
    assert_eq!(json["frame_type"], "road");
}

#[test]
fn test_cli_compare_reads_setup_files() {
    let dir = TempDir::new().unwrap();
    let current = write_setup(&dir, "current.json", &common::hg_1x11_setup());
    let proposed = write_setup(&dir, "proposed.json", &common::eagle_cassette_swap_setup());

    let (exit_code, stdout, stderr) =
        run_cli(&["compare", "--current", &current, "--proposed", &proposed]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["compatibility"]["status"], "incompatible");
    assert!(json["highlights"].as_array().is_some_and(|h| !h.is_empty()));
}

#[test]
fn test_cli_compare_rejects_two_stdin_setups() {
    let (exit_code, stdout, stderr) = run_cli(&["compare", "--current", "-", "--proposed", "-"]);

    assert_ne!(exit_code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("stdin"), "stderr: {stderr}");
}

#[test]
fn test_cli_compare_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = path_str(&dir.path().join("nope.json"));

    let (exit_code, _stdout, stderr) =
        run_cli(&["compare", "--current", &missing, "--proposed", &missing]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Failed to read"));
}

#[test]
fn test_cli_tire_pressure_from_flags() {
    let (exit_code, stdout, _stderr) = run_cli(&[
        "tire-pressure",
        "--rider-weight",
        "75",
        "--bike-weight",
        "13",
        "--width",
        "61",
        "--terrain",
        "enduro",
        "--tubeless",
    ]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["front_psi"].as_f64().unwrap() < json["rear_psi"].as_f64().unwrap());
}

#[test]
fn test_cli_tire_pressure_requires_weights() {
    let (exit_code, _stdout, stderr) = run_cli(&["tire-pressure", "--width", "61"]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("--rider-weight"));
}

#[test]
fn test_cli_suspension_from_input_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rider.json");
    fs::write(
        &path,
        r#"{ "rider_weight_kg": 75, "bike_category": "hardtail", "fork_model": "Fox 34" }"#,
    )
    .unwrap();

    let (exit_code, stdout, _stderr) = run_cli(&["suspension", "--input", &path_str(&path)]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["shock"].is_null());
    assert_eq!(json["fork"]["brand"], "fox");
}

#[test]
fn test_cli_config_prints_tables() {
    let (exit_code, stdout, _stderr) = run_cli(&["config"]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["drivetrain"]["chainline"]["optima"].is_object());
    assert!(json["suspension"]["presets"].is_object());
}
