// ABOUTME: Tire pressure engine deriving front/rear PSI from rider, bike and tire parameters
// ABOUTME: Contact patch base pressure through terrain, tubeless, condition and priority multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! # Tire Pressure Engine
//!
//! Pressure is computed as a strict left-to-right pipeline so results are
//! reproducible:
//!
//! 1. per-tire load (lb) = (rider + bike kg) × 2.20462 × load share
//! 2. contact patch (sq in) = base + per-mm × width
//! 3. base PSI = load ÷ contact patch
//! 4. × terrain factor (by width band) × tubeless factor (tubeless only)
//!    × condition factor × priority factor
//! 5. front/rear = adjusted × terrain split, rounded to the nearest 0.5 PSI;
//!    tubeless values sit at least one 0.5 PSI step below the tubed ones
//! 6. safe range = adjusted × terrain band, rounded to the nearest 0.5 PSI
//!
//! Notes come from independent rules evaluated against the computed values.

use crate::config::TirePressureConfig;
use crate::parsing::LenientParse;
use crate::rounding::round_to_step;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use tracing::debug;
use velotune_core::constants::limits::{
    MAX_BIKE_WEIGHT_KG, MAX_RIDER_WEIGHT_KG, MAX_TIRE_WIDTH_MM, MAX_WHEEL_DIAMETER_IN,
    MIN_TIRE_WIDTH_MM, MIN_WHEEL_DIAMETER_IN,
};
use velotune_core::constants::units::LBS_PER_KG;
use velotune_core::errors::{AppError, AppResult};

/// PSI outputs are rounded to this increment
const PSI_STEP: f64 = 0.5;

/// Terrain category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Terrain {
    /// Paved road
    Road,
    /// Gravel and hardpack
    Gravel,
    /// Singletrack trail
    #[default]
    Trail,
    /// Enduro, rough and steep
    Enduro,
    /// Downhill, bike park
    Downhill,
}

impl Terrain {
    /// Unpaved terrain
    #[must_use]
    pub const fn is_loose(self) -> bool {
        !matches!(self, Self::Road)
    }

    /// Terrain where rolling speed never outranks grip
    #[must_use]
    pub const fn is_technical(self) -> bool {
        matches!(self, Self::Enduro | Self::Downhill)
    }
}

impl LenientParse for Terrain {
    const KIND: &'static str = "terrain";

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "road" | "pavement" => Some(Self::Road),
            "gravel" | "hardpack" => Some(Self::Gravel),
            "trail" | "xc" | "singletrack" => Some(Self::Trail),
            "enduro" => Some(Self::Enduro),
            "downhill" | "dh" | "bike_park" => Some(Self::Downhill),
            _ => None,
        }
    }
}

impl From<String> for Terrain {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Road => "road",
            Self::Gravel => "gravel",
            Self::Trail => "trail",
            Self::Enduro => "enduro",
            Self::Downhill => "downhill",
        };
        f.write_str(name)
    }
}

/// Surface condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SurfaceCondition {
    /// Dry
    #[default]
    Dry,
    /// Wet
    Wet,
    /// Patchy, drying out
    Mixed,
}

impl LenientParse for SurfaceCondition {
    const KIND: &'static str = "surface condition";

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "dry" => Some(Self::Dry),
            "wet" | "muddy" => Some(Self::Wet),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }
}

impl From<String> for SurfaceCondition {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

/// What the rider wants from the tire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum RidePriority {
    /// Softer ride
    Comfort,
    /// More traction
    Grip,
    /// No bias
    #[default]
    Balanced,
    /// Lower rolling resistance
    Speed,
}

impl LenientParse for RidePriority {
    const KIND: &'static str = "ride priority";

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "comfort" => Some(Self::Comfort),
            "grip" | "traction" => Some(Self::Grip),
            "balanced" => Some(Self::Balanced),
            "speed" | "efficiency" => Some(Self::Speed),
            _ => None,
        }
    }
}

impl From<String> for RidePriority {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

/// Tire width class selecting the terrain factor table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthBand {
    /// Road and narrow gravel
    Narrow,
    /// Gravel and light XC
    Medium,
    /// Mountain bike
    Wide,
}

/// Tire pressure inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TirePressureParams {
    /// Rider weight with kit (kg)
    pub rider_weight_kg: f64,
    /// Bike weight (kg)
    pub bike_weight_kg: f64,
    /// Tire width (mm)
    pub tire_width_mm: f64,
    /// Wheel diameter (inches)
    pub wheel_diameter_in: f64,
    /// Terrain
    #[serde(default)]
    pub terrain: Terrain,
    /// Running tubeless
    #[serde(default)]
    pub tubeless: bool,
    /// Surface condition
    #[serde(default)]
    pub condition: SurfaceCondition,
    /// Ride priority
    #[serde(default)]
    pub priority: RidePriority,
}

/// Pressure window in PSI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureRange {
    /// Lowest safe pressure
    pub min_psi: f64,
    /// Highest useful pressure
    pub max_psi: f64,
}

/// Notes grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TireNotes {
    /// Terrain commentary
    pub terrain: Vec<String>,
    /// Setup and maintenance
    pub setup: Vec<String>,
    /// Safety warnings
    pub warnings: Vec<String>,
    /// General advice
    pub recommendations: Vec<String>,
}

/// Tire pressure recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TirePressureResult {
    /// Front tire (PSI)
    pub front_psi: f64,
    /// Rear tire (PSI)
    pub rear_psi: f64,
    /// Safe window around the adjusted pressure
    pub safe_range: PressureRange,
    /// 0-100
    pub confidence_score: f64,
    /// Contact patch pressure before adjustments (PSI)
    pub base_pressure_psi: f64,
    /// Width band used for the terrain factor
    pub width_band: WidthBand,
    /// Categorized notes
    pub notes: TireNotes,
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64, min_inclusive: bool) -> AppResult<()> {
    let above_min = if min_inclusive { value >= min } else { value > min };
    if value.is_finite() && above_min && value <= max {
        return Ok(());
    }
    let open = if min_inclusive { "[" } else { "(" };
    Err(
        AppError::invalid_parameter(format!("{name} must be in {open}{min}, {max}]"))
            .with_details(json!({ "parameter": name, "value": value, "min": min, "max": max })),
    )
}

fn validate(params: &TirePressureParams) -> AppResult<()> {
    check_range("rider_weight_kg", params.rider_weight_kg, 0.0, MAX_RIDER_WEIGHT_KG, false)?;
    check_range("bike_weight_kg", params.bike_weight_kg, 0.0, MAX_BIKE_WEIGHT_KG, false)?;
    check_range(
        "tire_width_mm",
        params.tire_width_mm,
        MIN_TIRE_WIDTH_MM,
        MAX_TIRE_WIDTH_MM,
        true,
    )?;
    check_range(
        "wheel_diameter_in",
        params.wheel_diameter_in,
        MIN_WHEEL_DIAMETER_IN,
        MAX_WHEEL_DIAMETER_IN,
        true,
    )
}

fn below_tubed(tubeless_psi: f64, tubed_unrounded: f64) -> f64 {
    let tubed_psi = round_to_step(tubed_unrounded, PSI_STEP);
    tubeless_psi.min(tubed_psi - PSI_STEP).max(0.0)
}

/// Calculate front and rear tire pressure
///
/// # Errors
///
/// Returns `InvalidParameter` when a weight, the tire width or the wheel
/// diameter is outside its accepted range.
pub fn calculate_tire_pressure(
    params: &TirePressureParams,
    config: &TirePressureConfig,
) -> AppResult<TirePressureResult> {
    validate(params)?;

    let terrain = params.terrain;
    let total_weight_kg = params.rider_weight_kg + params.bike_weight_kg;
    let load_lb = total_weight_kg * LBS_PER_KG * config.contact_patch.load_share_per_tire;
    let contact_area = config
        .contact_patch
        .area_per_mm_sq_in
        .mul_add(params.tire_width_mm, config.contact_patch.base_area_sq_in);
    let base_pressure = load_lb / contact_area;

    let width_band = config.width_bands.classify(params.tire_width_mm);
    let terrain_factor = *config.terrain_factors.for_band(width_band).get(terrain);
    let tubeless_factor = if params.tubeless {
        *config.tubeless_factors.get(terrain)
    } else {
        1.0
    };
    let condition_factor = config.condition_factors.factor(params.condition, terrain);
    let priority_factor = priority_factor(params.priority, terrain, config);

    let tubed = base_pressure * terrain_factor * condition_factor * priority_factor;
    let adjusted = tubed * tubeless_factor;

    let front_split = *config.weight_distribution.front.get(terrain);
    let rear_split = *config.weight_distribution.rear.get(terrain);
    let mut front_psi = round_to_step(adjusted * front_split, PSI_STEP);
    let mut rear_psi = round_to_step(adjusted * rear_split, PSI_STEP);
    if params.tubeless {
        // Rounding must not swallow the tubeless reduction
        front_psi = below_tubed(front_psi, tubed * front_split);
        rear_psi = below_tubed(rear_psi, tubed * rear_split);
    }

    let band = config.safe_range.get(terrain);
    let safe_range = PressureRange {
        min_psi: round_to_step(adjusted * band.min, PSI_STEP),
        max_psi: round_to_step(adjusted * band.max, PSI_STEP),
    };

    let confidence_score = confidence(params, total_weight_kg, config);
    let notes = build_notes(params, front_psi, total_weight_kg, config);

    debug!(
        terrain = %terrain,
        total_weight_kg,
        tire_width_mm = params.tire_width_mm,
        tubeless = params.tubeless,
        base_pressure,
        front_psi,
        rear_psi,
        "Calculated tire pressure"
    );

    Ok(TirePressureResult {
        front_psi,
        rear_psi,
        safe_range,
        confidence_score,
        base_pressure_psi: round_to_step(base_pressure, PSI_STEP),
        width_band,
        notes,
    })
}

fn priority_factor(priority: RidePriority, terrain: Terrain, config: &TirePressureConfig) -> f64 {
    let factors = &config.priority_factors;
    match priority {
        RidePriority::Comfort => factors.comfort,
        RidePriority::Grip => factors.grip,
        RidePriority::Balanced => 1.0,
        RidePriority::Speed if terrain.is_technical() => factors.speed.min(1.0),
        RidePriority::Speed => factors.speed,
    }
}

fn confidence(params: &TirePressureParams, total_weight_kg: f64, config: &TirePressureConfig) -> f64 {
    let rules = &config.confidence;
    let mut score = rules.base;

    if config
        .common_widths_mm
        .get(params.terrain)
        .contains(params.tire_width_mm)
    {
        score += rules.common_width_bonus;
    } else {
        score -= rules.uncommon_width_penalty;
    }
    if total_weight_kg > rules.heavy_system_kg || total_weight_kg < rules.light_system_kg {
        score -= rules.extreme_weight_penalty;
    }
    if params.condition != SurfaceCondition::Dry {
        score -= rules.condition_penalty;
    }

    score.clamp(rules.floor, 100.0)
}

fn terrain_notes(params: &TirePressureParams, config: &TirePressureConfig) -> Vec<String> {
    let terrain = params.terrain;
    let mut notes = vec![match terrain {
        Terrain::Road => "Road: higher pressure lowers rolling resistance on smooth tarmac",
        Terrain::Gravel => "Gravel: lower pressure lets the tire conform to loose surfaces",
        Terrain::Trail => "Trail: balance grip in corners against support on rocks and roots",
        Terrain::Enduro => "Enduro: prioritize grip and casing support on rough, steep descents",
        Terrain::Downhill => "Downhill: run low enough for traction, with a casing that resists rim strikes",
    }
    .to_owned()];

    let common = config.common_widths_mm.get(terrain);
    if params.tire_width_mm < common.min {
        notes.push(format!(
            "{:.0} mm is narrow for {terrain}; {:.0}-{:.0} mm is typical",
            params.tire_width_mm, common.min, common.max
        ));
    } else if params.tire_width_mm > common.max {
        notes.push(format!(
            "{:.0} mm is wide for {terrain}; {:.0}-{:.0} mm is typical",
            params.tire_width_mm, common.min, common.max
        ));
    }
    if params.condition == SurfaceCondition::Wet {
        notes.push("Wet surface: pressure reduced for extra grip".to_owned());
    }
    notes
}

fn setup_notes(params: &TirePressureParams, config: &TirePressureConfig) -> Vec<String> {
    let mut notes = Vec::new();
    if params.tubeless {
        notes.push("Tubeless: top up sealant every 2-3 months".to_owned());
    } else if params.terrain.is_loose() {
        notes.push("With tubes: consider tubeless to run lower pressure without pinch flats".to_owned());
    }
    if config.width_bands.classify(params.tire_width_mm) == WidthBand::Wide {
        notes.push("Wide tire: a 1 PSI change makes a noticeable difference".to_owned());
    }
    if params.wheel_diameter_in < 26.0 {
        notes.push("Small wheel: check pressure more often, small volumes lose air quickly".to_owned());
    }
    notes
}

fn warnings(
    params: &TirePressureParams,
    front_psi: f64,
    total_weight_kg: f64,
    config: &TirePressureConfig,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let floor = *config.pinch_flat_floor_psi.get(params.terrain);

    if !params.tubeless && front_psi < floor {
        warnings.push(format!(
            "Front pressure {front_psi:.1} PSI is below {floor:.0} PSI with tubes: high pinch-flat risk"
        ));
    }
    if params.tubeless && front_psi < floor * 0.85 {
        warnings.push(format!(
            "Front pressure {front_psi:.1} PSI risks tire burping and rim strikes; consider inserts"
        ));
    }
    if total_weight_kg > config.confidence.heavy_system_kg {
        warnings.push(format!(
            "System weight {total_weight_kg:.0} kg: use a reinforced casing and check pressure often"
        ));
    }
    warnings
}

fn recommendations(params: &TirePressureParams) -> Vec<String> {
    let mut recommendations = vec![
        "Start at these pressures and adjust in 1-2 PSI steps".to_owned(),
        "Check pressure before every ride with a reliable gauge".to_owned(),
    ];
    if params.priority == RidePriority::Speed && params.terrain.is_technical() {
        recommendations.push(format!(
            "Speed priority is not applied on {} terrain; grip comes first",
            params.terrain
        ));
    }
    if params.condition != SurfaceCondition::Dry {
        recommendations.push("Drop another 1-2 PSI if grip is lacking in the wet".to_owned());
    }
    recommendations
}

fn build_notes(
    params: &TirePressureParams,
    front_psi: f64,
    total_weight_kg: f64,
    config: &TirePressureConfig,
) -> TireNotes {
    TireNotes {
        terrain: terrain_notes(params, config),
        setup: setup_notes(params, config),
        warnings: warnings(params, front_psi, total_weight_kg, config),
        recommendations: recommendations(params),
    }
}
