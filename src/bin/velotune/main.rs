// ABOUTME: velotune CLI - command-line harness for the drivetrain, tire and suspension engines
// ABOUTME: Parses arguments, loads engine configuration, and prints results as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors
//!
//! Usage:
//! ```bash
//! # Compare two setups described as JSON files
//! velotune compare --current current.json --proposed proposed.json
//!
//! # Size a chain
//! velotune chain-length --chainring 32 --cog 52 --chainstay 435
//!
//! # Check chainline on a trail bike
//! velotune chainline --chainring-offset 52 --cassette-offset 0 --chainstay 435 --frame trail
//!
//! # Tire pressure for a tubeless trail setup
//! velotune tire-pressure --rider-weight 78 --bike-weight 14 --width 61 --terrain trail --tubeless
//!
//! # Suspension baseline
//! velotune suspension --rider-weight 78 --gear-weight 4 --category enduro --fork-model "Fox 38"
//!
//! # Print the effective engine configuration
//! velotune config
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use velotune::logging::LoggingConfig;
use velotune::EngineConfig;

#[derive(Parser)]
#[command(
    name = "velotune",
    about = "Bicycle drivetrain, tire pressure and suspension calculator",
    long_about = "Command-line harness for the velotune engines. Inputs are flags or JSON files; results are printed as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compare a current and a proposed drivetrain setup
    Compare {
        /// Current setup JSON file ("-" for stdin)
        #[arg(long)]
        current: PathBuf,

        /// Proposed setup JSON file ("-" for stdin)
        #[arg(long)]
        proposed: PathBuf,
    },

    /// Recommend a chain length
    ChainLength {
        /// Largest chainring (teeth)
        #[arg(long)]
        chainring: u32,

        /// Largest cog (teeth)
        #[arg(long)]
        cog: u32,

        /// Chainstay length (mm)
        #[arg(long)]
        chainstay: f64,
    },

    /// Analyse chainline for a frame category
    Chainline {
        /// Chainring offset from frame centerline (mm)
        #[arg(long)]
        chainring_offset: f64,

        /// Cassette offset (mm)
        #[arg(long, default_value = "0")]
        cassette_offset: f64,

        /// Chainstay length (mm)
        #[arg(long)]
        chainstay: f64,

        /// Frame category: road, gravel, cross_country, trail, enduro
        #[arg(long, default_value = "trail")]
        frame: String,
    },

    /// Recommend tire pressure
    TirePressure(commands::setup::TireArgs),

    /// Recommend suspension baseline settings
    Suspension(commands::setup::SuspensionArgs),

    /// Print the effective engine configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let config = EngineConfig::load()?;
    debug!("Engine configuration ready");

    match cli.command {
        Command::Compare { current, proposed } => {
            commands::drivetrain::compare(&config, &current, &proposed)?;
        }
        Command::ChainLength {
            chainring,
            cog,
            chainstay,
        } => {
            commands::drivetrain::chain_length(chainring, cog, chainstay)?;
        }
        Command::Chainline {
            chainring_offset,
            cassette_offset,
            chainstay,
            frame,
        } => {
            commands::drivetrain::chainline(
                &config,
                chainring_offset,
                cassette_offset,
                chainstay,
                &frame,
            )?;
        }
        Command::TirePressure(args) => commands::setup::tire_pressure(&config, args)?,
        Command::Suspension(args) => commands::setup::suspension(&config, args)?,
        Command::Config => helpers::io::print_json(&config)?,
    }

    Ok(())
}
