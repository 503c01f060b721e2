// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors
// ABOUTME: JSON input and output helpers for the velotune CLI
// ABOUTME: Reads request documents from files or stdin and prints results and errors as JSON

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;
use velotune::logging::AppLogger;
use velotune::{AppResult, ErrorResponse};

/// Whether a path argument names stdin
#[must_use]
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read and deserialize a JSON document; `-` reads stdin
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if is_stdin(path) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read JSON from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

/// Run one engine call, log its timing, and print the result
///
/// Engine errors are printed to stderr as an error document before being
/// returned, so scripted callers get the code and details as JSON.
pub fn run_engine<T, F>(engine: &str, calculate: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> AppResult<T>,
{
    let started = Instant::now();
    let outcome = calculate();
    AppLogger::log_calculation(engine, outcome.is_ok(), started.elapsed().as_micros());

    match outcome {
        Ok(result) => print_json(&result),
        Err(error) => {
            let response = ErrorResponse::from(error.clone());
            eprintln!("{}", serde_json::to_string_pretty(&response)?);
            Err(error.into())
        }
    }
}
