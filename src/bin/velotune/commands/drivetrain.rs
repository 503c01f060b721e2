// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors
// ABOUTME: Drivetrain commands for the velotune CLI
// ABOUTME: Setup comparison, chain length sizing and chainline analysis

use crate::helpers::io::{is_stdin, read_json, run_engine};
use anyhow::{bail, Result};
use std::path::Path;
use tracing::debug;
use velotune::engines::{analyze_chainline, calculate_chain_length, compare_setups, FrameType};
use velotune::{BikeSetup, EngineConfig};

/// Compare two setups read from JSON files
pub fn compare(config: &EngineConfig, current: &Path, proposed: &Path) -> Result<()> {
    if is_stdin(current) && is_stdin(proposed) {
        bail!("Only one of --current and --proposed can read from stdin");
    }
    let current_setup: BikeSetup = read_json(current)?;
    let proposed_setup: BikeSetup = read_json(proposed)?;
    debug!(
        current = %current.display(),
        proposed = %proposed.display(),
        "Loaded setups"
    );

    run_engine("drivetrain.compare", || {
        compare_setups(&current_setup, &proposed_setup, &config.drivetrain)
    })
}

/// Recommend a chain length
pub fn chain_length(chainring: u32, cog: u32, chainstay: f64) -> Result<()> {
    run_engine("drivetrain.chain_length", || {
        calculate_chain_length(chainring, cog, chainstay)
    })
}

/// Analyse chainline for the named frame category
pub fn chainline(
    config: &EngineConfig,
    chainring_offset: f64,
    cassette_offset: f64,
    chainstay: f64,
    frame: &str,
) -> Result<()> {
    let frame_type = FrameType::from(frame.to_owned());
    run_engine("drivetrain.chainline", || {
        analyze_chainline(
            chainring_offset,
            cassette_offset,
            chainstay,
            frame_type,
            &config.drivetrain.chainline,
        )
    })
}
