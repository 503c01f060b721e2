// ABOUTME: Suspension setup engine producing fork and shock baseline settings
// ABOUTME: Air pressure, sag and rebound/compression clicks from system weight and category presets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! # Suspension Setup Engine
//!
//! For each unit (fork, and shock unless the bike is a hardtail):
//!
//! - pressure = system weight × PSI/kg ratio × (1 + style + terrain adjustment)
//! - sag mm = travel × sag % ÷ 100
//! - weight steps = `floor((system weight − reference) ÷ kg per click)`
//! - rebound = base − steps, compression = base + steps + style + terrain,
//!   both clamped to the configured click range
//!
//! Fork and shock model tags only select brand-specific setup notes.

use crate::config::{SuspensionConfig, UnitPreset};
use crate::parsing::{normalize, LenientParse};
use crate::rounding::round_to_decimals;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use tracing::debug;
use velotune_core::constants::limits::{MAX_GEAR_WEIGHT_KG, MAX_RIDER_WEIGHT_KG};
use velotune_core::errors::{AppError, AppResult};

/// Bike category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum BikeCategory {
    /// Cross-country
    Xc,
    /// Trail
    #[default]
    Trail,
    /// Enduro
    Enduro,
    /// Downhill
    Downhill,
    /// Hardtail, no rear shock
    Hardtail,
}

impl LenientParse for BikeCategory {
    const KIND: &'static str = "bike category";

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "xc" | "cross_country" => Some(Self::Xc),
            "trail" => Some(Self::Trail),
            "enduro" => Some(Self::Enduro),
            "downhill" | "dh" => Some(Self::Downhill),
            "hardtail" | "ht" => Some(Self::Hardtail),
            _ => None,
        }
    }
}

impl From<String> for BikeCategory {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl fmt::Display for BikeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Xc => "XC",
            Self::Trail => "trail",
            Self::Enduro => "enduro",
            Self::Downhill => "downhill",
            Self::Hardtail => "hardtail",
        };
        f.write_str(name)
    }
}

/// Riding style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum RidingStyle {
    /// Comfort first
    Relaxed,
    /// All-round
    #[default]
    Balanced,
    /// Hard charging
    Aggressive,
    /// Racing
    Racing,
}

impl LenientParse for RidingStyle {
    const KIND: &'static str = "riding style";

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "relaxed" | "casual" => Some(Self::Relaxed),
            "balanced" => Some(Self::Balanced),
            "aggressive" => Some(Self::Aggressive),
            "racing" | "race" => Some(Self::Racing),
            _ => None,
        }
    }
}

impl From<String> for RidingStyle {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

/// Trail terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TrailTerrain {
    /// Flowing, smooth trails
    Smooth,
    /// A bit of everything
    #[default]
    Mixed,
    /// Rocks and roots
    Rough,
    /// Jumps and drops
    BikePark,
}

impl LenientParse for TrailTerrain {
    const KIND: &'static str = "trail terrain";

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "smooth" | "flow" => Some(Self::Smooth),
            "mixed" => Some(Self::Mixed),
            "rough" | "rocky" | "technical" => Some(Self::Rough),
            "bike_park" | "park" | "bikepark" => Some(Self::BikePark),
            _ => None,
        }
    }
}

impl From<String> for TrailTerrain {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

/// Suspension manufacturer inferred from a model tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspensionBrand {
    /// Fox
    Fox,
    /// `RockShox`
    RockShox,
    /// Marzocchi
    Marzocchi,
    /// Öhlins
    Ohlins,
    /// DT Swiss
    DtSwiss,
    /// Unknown or unbranded
    #[default]
    Generic,
}

impl SuspensionBrand {
    /// Resolve a brand from a free-form model tag such as "Fox 36 Factory"
    #[must_use]
    pub fn from_model(model: &str) -> Self {
        let tag = normalize(&model.to_lowercase());
        if tag.contains("fox") {
            Self::Fox
        } else if tag.contains("rockshox") || tag.contains("rock_shox") {
            Self::RockShox
        } else if tag.contains("marzocchi") {
            Self::Marzocchi
        } else if tag.contains("ohlins") || tag.contains("öhlins") {
            Self::Ohlins
        } else if tag.contains("dt_swiss") || tag.contains("dtswiss") {
            Self::DtSwiss
        } else {
            Self::Generic
        }
    }

    const fn setup_note(self) -> &'static str {
        match self {
            Self::Fox => "Fox: count rebound and compression clicks from fully closed (clockwise)",
            Self::RockShox => "RockShox: use the sag gradients on the stanchion; tune ramp-up with Bottomless Tokens",
            Self::Marzocchi => "Marzocchi: cycle the fork after every pressure change to equalize the negative chamber",
            Self::Ohlins => "Öhlins: start from the air chart on the leg, then confirm by measuring sag",
            Self::DtSwiss => "DT Swiss: set pressure with the fork fully extended and recheck after a short ride",
            Self::Generic => "Cross-check the pressure against the manufacturer's chart",
        }
    }
}

/// Suspension setup inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspensionInput {
    /// Rider weight (kg)
    pub rider_weight_kg: f64,
    /// Riding gear: pack, water, armour (kg)
    #[serde(default)]
    pub gear_weight_kg: f64,
    /// Bike category
    #[serde(default)]
    pub bike_category: BikeCategory,
    /// Riding style
    #[serde(default)]
    pub riding_style: RidingStyle,
    /// Terrain
    #[serde(default)]
    pub terrain: TrailTerrain,
    /// Fork model tag
    #[serde(default)]
    pub fork_model: Option<String>,
    /// Shock model tag
    #[serde(default)]
    pub shock_model: Option<String>,
}

/// Baseline settings for one suspension unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspensionUnitSettings {
    /// Air pressure (PSI), whole number
    pub pressure_psi: f64,
    /// Target sag (% of travel)
    pub sag_percent: f64,
    /// Target sag (mm), 0.1 mm
    pub sag_mm: f64,
    /// Travel, or stroke for a shock (mm)
    pub travel_mm: f64,
    /// Rebound clicks from closed; fewer is slower
    pub rebound_clicks: i32,
    /// Compression clicks from open, `None` without external adjustment
    pub compression_clicks: Option<i32>,
    /// Brand the notes were chosen for
    pub brand: SuspensionBrand,
}

/// Fork and shock baseline with setup guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspensionResult {
    /// Category used
    pub bike_category: BikeCategory,
    /// Rider plus gear (kg)
    pub total_weight_kg: f64,
    /// Fork settings
    pub fork: SuspensionUnitSettings,
    /// Shock settings, absent for hardtails
    pub shock: Option<SuspensionUnitSettings>,
    /// Setup procedure, always in the same order
    pub recommendations: Vec<String>,
    /// Category, style, terrain and brand notes
    pub setup_notes: Vec<String>,
}

const SETUP_PROCEDURE: [&str; 3] = [
    "Set sag: in riding position, cycle the suspension a few times, then measure and adjust pressure in 5 PSI steps",
    "Test rebound: push down hard and let go; it should return quickly without topping out or bouncing",
    "Maintenance: lower leg and air can service every 50 hours, full damper service every 100-200 hours",
];

fn validate(input: &SuspensionInput) -> AppResult<()> {
    let rider = input.rider_weight_kg;
    if !rider.is_finite() || rider <= 0.0 || rider > MAX_RIDER_WEIGHT_KG {
        return Err(AppError::invalid_parameter(format!(
            "rider_weight_kg must be in (0, {MAX_RIDER_WEIGHT_KG}]"
        ))
        .with_details(json!({ "parameter": "rider_weight_kg", "value": rider })));
    }
    let gear = input.gear_weight_kg;
    if !gear.is_finite() || !(0.0..=MAX_GEAR_WEIGHT_KG).contains(&gear) {
        return Err(AppError::invalid_parameter(format!(
            "gear_weight_kg must be in [0, {MAX_GEAR_WEIGHT_KG}]"
        ))
        .with_details(json!({ "parameter": "gear_weight_kg", "value": gear })));
    }
    Ok(())
}

struct Adjustments {
    pressure_multiplier: f64,
    weight_steps: i32,
    extra_compression: i32,
}

fn unit_settings(
    preset: &UnitPreset,
    total_weight_kg: f64,
    adjustments: &Adjustments,
    brand: SuspensionBrand,
    config: &SuspensionConfig,
) -> SuspensionUnitSettings {
    let clamp = |clicks: i32| clicks.clamp(config.min_clicks, config.max_clicks);
    let pressure = total_weight_kg * preset.pressure_ratio_psi_per_kg * adjustments.pressure_multiplier;
    let sag_mm = preset.travel_mm * preset.sag_percent / 100.0;

    SuspensionUnitSettings {
        pressure_psi: pressure.round(),
        sag_percent: preset.sag_percent,
        sag_mm: round_to_decimals(sag_mm, 1),
        travel_mm: preset.travel_mm,
        rebound_clicks: clamp(preset.base_rebound_clicks - adjustments.weight_steps),
        compression_clicks: preset
            .base_compression_clicks
            .map(|base| clamp(base + adjustments.weight_steps + adjustments.extra_compression)),
        brand,
    }
}

/// Calculate baseline fork and shock settings
///
/// # Errors
///
/// Returns `InvalidParameter` when rider weight is not in (0, 200] kg or gear
/// weight is not in [0, 50] kg.
pub fn calculate_suspension_settings(
    input: &SuspensionInput,
    config: &SuspensionConfig,
) -> AppResult<SuspensionResult> {
    validate(input)?;

    let total_weight_kg = input.rider_weight_kg + input.gear_weight_kg;
    let preset = config.presets.for_category(input.bike_category);
    let adjustments = Adjustments {
        pressure_multiplier: 1.0
            + config.style_pressure_adjustment.get(input.riding_style)
            + config.terrain_pressure_adjustment.get(input.terrain),
        weight_steps: ((total_weight_kg - config.reference_weight_kg) / config.weight_per_click_kg)
            .floor() as i32,
        extra_compression: config.style_compression_clicks.get(input.riding_style)
            + config.terrain_compression_clicks.get(input.terrain),
    };

    let fork_brand = input
        .fork_model
        .as_deref()
        .map_or(SuspensionBrand::Generic, SuspensionBrand::from_model);
    let shock_brand = input
        .shock_model
        .as_deref()
        .map_or(SuspensionBrand::Generic, SuspensionBrand::from_model);

    let fork = unit_settings(&preset.fork, total_weight_kg, &adjustments, fork_brand, config);
    let shock = preset
        .shock
        .as_ref()
        .map(|shock| unit_settings(shock, total_weight_kg, &adjustments, shock_brand, config));

    debug!(
        category = %input.bike_category,
        total_weight_kg,
        fork_psi = fork.pressure_psi,
        shock_psi = shock.as_ref().map(|s| s.pressure_psi),
        "Calculated suspension settings"
    );

    Ok(SuspensionResult {
        bike_category: input.bike_category,
        total_weight_kg,
        fork,
        setup_notes: setup_notes(input, fork_brand, shock.as_ref().map(|s| s.brand)),
        shock,
        recommendations: SETUP_PROCEDURE.iter().map(|s| (*s).to_owned()).collect(),
    })
}

fn setup_notes(
    input: &SuspensionInput,
    fork_brand: SuspensionBrand,
    shock_brand: Option<SuspensionBrand>,
) -> Vec<String> {
    let mut notes = vec![match input.bike_category {
        BikeCategory::Xc => "XC: prioritize pedaling efficiency; use the lockout on long climbs",
        BikeCategory::Trail => "Trail: balanced baseline; fine tune compression for your local trails",
        BikeCategory::Enduro => "Enduro: support deep in the travel matters; add volume spacers if you bottom out",
        BikeCategory::Downhill => "Downhill: extra sag for traction; consider a coil shock for consistency",
        BikeCategory::Hardtail => "Hardtail: fork only; slightly less sag keeps the geometry stable",
    }
    .to_owned()];

    match input.riding_style {
        RidingStyle::Relaxed => notes.push("Relaxed style: pressure reduced for comfort".to_owned()),
        RidingStyle::Racing => notes.push("Racing style: firmer platform for efficiency under power".to_owned()),
        RidingStyle::Balanced | RidingStyle::Aggressive => {}
    }
    if input.terrain == TrailTerrain::BikePark {
        notes.push("Bike park: check bottom-out on the biggest features and add a volume spacer if needed".to_owned());
    }

    notes.push(fork_brand.setup_note().to_owned());
    if let Some(brand) = shock_brand.filter(|b| *b != fork_brand) {
        notes.push(brand.setup_note().to_owned());
    }
    notes
}
