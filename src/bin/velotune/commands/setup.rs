// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors
// ABOUTME: Rider setup commands for the velotune CLI
// ABOUTME: Tire pressure and suspension baselines from flags or a JSON request file

use crate::helpers::io::{read_json, run_engine};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use velotune::engines::{
    calculate_suspension_settings, calculate_tire_pressure, BikeCategory, RidePriority,
    RidingStyle, SurfaceCondition, SuspensionInput, Terrain, TirePressureParams, TrailTerrain,
};
use velotune::EngineConfig;

/// Tire pressure request, from flags or `--input`
#[derive(Args)]
pub struct TireArgs {
    /// JSON request file ("-" for stdin); replaces the flags below
    #[arg(long, conflicts_with_all = ["rider_weight", "bike_weight", "width"])]
    input: Option<PathBuf>,

    /// Rider weight with kit (kg)
    #[arg(long, required_unless_present = "input")]
    rider_weight: Option<f64>,

    /// Bike weight (kg)
    #[arg(long, required_unless_present = "input")]
    bike_weight: Option<f64>,

    /// Tire width (mm)
    #[arg(long, required_unless_present = "input")]
    width: Option<f64>,

    /// Wheel diameter (inches)
    #[arg(long, default_value = "29")]
    wheel_diameter: f64,

    /// Terrain: road, gravel, trail, enduro, downhill
    #[arg(long, default_value = "trail")]
    terrain: String,

    /// Tubeless setup
    #[arg(long)]
    tubeless: bool,

    /// Surface condition: dry, wet, mixed
    #[arg(long, default_value = "dry")]
    condition: String,

    /// Ride priority: comfort, grip, balanced, speed
    #[arg(long, default_value = "balanced")]
    priority: String,
}

impl TireArgs {
    fn into_params(self) -> Result<TirePressureParams> {
        if let Some(path) = self.input {
            return read_json(&path);
        }
        Ok(TirePressureParams {
            rider_weight_kg: self.rider_weight.context("--rider-weight is required")?,
            bike_weight_kg: self.bike_weight.context("--bike-weight is required")?,
            tire_width_mm: self.width.context("--width is required")?,
            wheel_diameter_in: self.wheel_diameter,
            terrain: Terrain::from(self.terrain),
            tubeless: self.tubeless,
            condition: SurfaceCondition::from(self.condition),
            priority: RidePriority::from(self.priority),
        })
    }
}

/// Suspension request, from flags or `--input`
#[derive(Args)]
pub struct SuspensionArgs {
    /// JSON request file ("-" for stdin); replaces the flags below
    #[arg(long, conflicts_with = "rider_weight")]
    input: Option<PathBuf>,

    /// Rider weight (kg)
    #[arg(long, required_unless_present = "input")]
    rider_weight: Option<f64>,

    /// Riding gear weight (kg)
    #[arg(long, default_value = "0")]
    gear_weight: f64,

    /// Bike category: xc, trail, enduro, downhill, hardtail
    #[arg(long, default_value = "trail")]
    category: String,

    /// Riding style: relaxed, balanced, aggressive, racing
    #[arg(long, default_value = "balanced")]
    style: String,

    /// Terrain: smooth, mixed, rough, bike_park
    #[arg(long, default_value = "mixed")]
    terrain: String,

    /// Fork model, e.g. "Fox 36"
    #[arg(long)]
    fork_model: Option<String>,

    /// Shock model, e.g. "RockShox Super Deluxe"
    #[arg(long)]
    shock_model: Option<String>,
}

impl SuspensionArgs {
    fn into_input(self) -> Result<SuspensionInput> {
        if let Some(path) = self.input {
            return read_json(&path);
        }
        Ok(SuspensionInput {
            rider_weight_kg: self.rider_weight.context("--rider-weight is required")?,
            gear_weight_kg: self.gear_weight,
            bike_category: BikeCategory::from(self.category),
            riding_style: RidingStyle::from(self.style),
            terrain: TrailTerrain::from(self.terrain),
            fork_model: self.fork_model,
            shock_model: self.shock_model,
        })
    }
}

/// Recommend tire pressure
pub fn tire_pressure(config: &EngineConfig, args: TireArgs) -> Result<()> {
    let params = args.into_params()?;
    run_engine("tire_pressure", || {
        calculate_tire_pressure(&params, &config.tire_pressure)
    })
}

/// Recommend suspension settings
pub fn suspension(config: &EngineConfig, args: SuspensionArgs) -> Result<()> {
    let input = args.into_input()?;
    run_engine("suspension", || {
        calculate_suspension_settings(&input, &config.suspension)
    })
}
