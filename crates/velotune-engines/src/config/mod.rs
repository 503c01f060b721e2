// ABOUTME: Engine configuration container for drivetrain, tire pressure and suspension tables
// ABOUTME: Loads canonical defaults, applies environment overrides, and validates table ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! Engine Configuration Module
//!
//! Every policy constant the engines use is data in this module. Category
//! dependent values are keyed tables (one field per enum variant) read through a
//! `get`/`for_*` accessor, so the rule set can be audited, serialized and tested.
//!
//! # Module Structure
//!
//! - `drivetrain` - speed defaults, cross-chaining table, fix costs, chainline optima
//! - `tire_pressure` - contact patch model, terrain/tubeless/condition/priority factors
//! - `suspension` - per-category presets and style/terrain adjustments
//!
//! There is no global instance: load once at the edge and pass references.

pub mod drivetrain;
pub mod error;
pub mod suspension;
pub mod tire_pressure;

pub use drivetrain::{
    ChainlineConfig, ChainlineOptima, CompatibilityConfig, CrossChainingConfig, DrivetrainConfig,
    DrivetrainDefaults,
};
pub use error::ConfigError;
pub use suspension::{
    CategoryPreset, CategoryPresets, StyleTable, SuspensionConfig, TrailTerrainTable, UnitPreset,
};
pub use tire_pressure::{
    Band, ConditionFactorsConfig, ContactPatchConfig, PriorityFactorsConfig, TerrainFactorsByWidth,
    TerrainTable, TireConfidenceConfig, TirePressureConfig, WeightDistributionConfig,
    WidthBandsConfig,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::iter;
use std::str::FromStr;
use tracing::debug;

/// Environment variable overriding the comparison cadence (rpm)
pub const ENV_DEFAULT_CADENCE_RPM: &str = "VELOTUNE_DEFAULT_CADENCE_RPM";
/// Environment variable overriding the fallback wheel diameter (inches)
pub const ENV_DEFAULT_WHEEL_DIAMETER_IN: &str = "VELOTUNE_DEFAULT_WHEEL_DIAMETER_IN";
/// Environment variable overriding the freehub fix cost
pub const ENV_FREEHUB_FIX_COST: &str = "VELOTUNE_FREEHUB_FIX_COST";
/// Environment variable overriding the derailleur upgrade cost
pub const ENV_DERAILLEUR_UPGRADE_COST: &str = "VELOTUNE_DERAILLEUR_UPGRADE_COST";
/// Environment variable overriding the chain replacement cost
pub const ENV_CHAIN_REPLACEMENT_COST: &str = "VELOTUNE_CHAIN_REPLACEMENT_COST";
/// Environment variable overriding the tire confidence floor
pub const ENV_TIRE_CONFIDENCE_FLOOR: &str = "VELOTUNE_TIRE_CONFIDENCE_FLOOR";
/// Environment variable overriding the suspension reference rider weight (kg)
pub const ENV_SUSPENSION_REFERENCE_WEIGHT_KG: &str = "VELOTUNE_SUSPENSION_REFERENCE_WEIGHT_KG";

/// Main engine configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Drivetrain engine tables
    pub drivetrain: DrivetrainConfig,
    /// Tire pressure engine tables
    pub tire_pressure: TirePressureConfig,
    /// Suspension engine tables
    pub suspension: SuspensionConfig,
}

impl EngineConfig {
    /// Load the canonical defaults with environment overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the result fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!(
            cadence_rpm = config.drivetrain.defaults.cadence_rpm,
            wheel_diameter_in = config.drivetrain.defaults.wheel_diameter_in,
            tire_confidence_floor = config.tire_pressure.confidence.floor,
            "Engine configuration loaded"
        );
        Ok(config)
    }

    /// Validate table ordering and value ranges
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_drivetrain()?;
        self.validate_tire_pressure()?;
        self.validate_suspension()
    }

    fn validate_drivetrain(&self) -> Result<(), ConfigError> {
        let dt = &self.drivetrain;

        if !dt.defaults.cadence_rpm.is_finite()
            || dt.defaults.cadence_rpm <= 0.0
            || dt.defaults.cadence_rpm > 200.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Default cadence must be between 0 and 200 rpm",
            ));
        }
        if !dt.defaults.wheel_diameter_in.is_finite()
            || dt.defaults.wheel_diameter_in <= 0.0
            || dt.defaults.wheel_diameter_in > 32.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Default wheel diameter must be between 0 and 32 inches",
            ));
        }

        let cc = &dt.cross_chaining;
        if cc.high_efficiency_loss_percent < cc.medium_efficiency_loss_percent {
            return Err(ConfigError::InvalidRange(
                "High severity efficiency loss must be >= medium severity loss",
            ));
        }

        let costs = &dt.compatibility;
        if [
            costs.freehub_fix_cost,
            costs.derailleur_upgrade_cost,
            costs.chain_replacement_cost,
        ]
        .iter()
        .any(|cost| !cost.is_finite() || *cost < 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Fix costs must be finite and not negative",
            ));
        }
        if !(0.0..=100.0).contains(&costs.confidence_penalty_per_issue) {
            return Err(ConfigError::ValueOutOfRange(
                "Confidence penalty per issue must be between 0 and 100",
            ));
        }

        let cl = &dt.chainline;
        if cl.aligned_threshold_mm >= cl.notable_threshold_mm
            || cl.notable_threshold_mm >= cl.severe_threshold_mm
        {
            return Err(ConfigError::InvalidRange(
                "Chainline thresholds must be aligned < notable < severe",
            ));
        }
        if !(0.0..=100.0).contains(&cl.min_efficiency_percent) {
            return Err(ConfigError::ValueOutOfRange(
                "Minimum chainline efficiency must be between 0 and 100",
            ));
        }

        Ok(())
    }

    fn validate_tire_pressure(&self) -> Result<(), ConfigError> {
        let tp = &self.tire_pressure;

        if tp.contact_patch.base_area_sq_in < 0.0 || tp.contact_patch.area_per_mm_sq_in <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Contact patch area coefficients must be positive",
            ));
        }
        if tp.contact_patch.load_share_per_tire <= 0.0 || tp.contact_patch.load_share_per_tire > 1.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Load share per tire must be between 0 and 1",
            ));
        }
        if tp.width_bands.narrow_max_mm >= tp.width_bands.medium_max_mm {
            return Err(ConfigError::InvalidRange(
                "narrow_max_mm must be < medium_max_mm",
            ));
        }

        for table in [
            &tp.terrain_factors.narrow,
            &tp.terrain_factors.medium,
            &tp.terrain_factors.wide,
        ] {
            let with_front = product(table, &tp.weight_distribution.front);
            let with_rear = product(table, &tp.weight_distribution.rear);
            let with_tubeless = product(table, &tp.tubeless_factors);
            if !strictly_descending(&with_front)
                || !strictly_descending(&with_rear)
                || !strictly_descending(&with_tubeless)
            {
                return Err(ConfigError::InvalidRange(
                    "Terrain factors must fall from road to downhill after front/rear split and tubeless adjustment",
                ));
            }
        }

        if tp.tubeless_factors.ordered().iter().any(|f| **f >= 1.0 || **f <= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "Tubeless factors must be between 0 and 1 (exclusive)",
            ));
        }
        if tp
            .weight_distribution
            .front
            .ordered()
            .iter()
            .zip(tp.weight_distribution.rear.ordered())
            .any(|(front, rear)| **front >= *rear)
        {
            return Err(ConfigError::InvalidRange(
                "Front multiplier must be below rear multiplier for every terrain",
            ));
        }
        if tp
            .safe_range
            .ordered()
            .iter()
            .any(|band| band.min <= 0.0 || band.min >= 1.0 || band.max <= 1.0)
        {
            return Err(ConfigError::InvalidRange(
                "Safe range bands must straddle 1.0 (min < 1 < max)",
            ));
        }

        let confidence = &tp.confidence;
        if !(0.0..=100.0).contains(&confidence.floor) || confidence.floor > confidence.base {
            return Err(ConfigError::ValueOutOfRange(
                "Confidence floor must be between 0 and the base score",
            ));
        }
        if confidence.light_system_kg >= confidence.heavy_system_kg {
            return Err(ConfigError::InvalidRange(
                "light_system_kg must be < heavy_system_kg",
            ));
        }

        Ok(())
    }

    fn validate_suspension(&self) -> Result<(), ConfigError> {
        let susp = &self.suspension;

        if !susp.reference_weight_kg.is_finite()
            || susp.reference_weight_kg <= 0.0
            || !susp.weight_per_click_kg.is_finite()
            || susp.weight_per_click_kg <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Reference weight and weight per click must be positive",
            ));
        }
        if susp.min_clicks < 0 || susp.min_clicks >= susp.max_clicks {
            return Err(ConfigError::InvalidRange(
                "Click clamp must satisfy 0 <= min_clicks < max_clicks",
            ));
        }

        let presets = susp.presets.all();
        for preset in presets {
            let units = iter::once(&preset.fork).chain(preset.shock.as_ref());
            for unit in units {
                if unit.pressure_ratio_psi_per_kg <= 0.0 || unit.travel_mm <= 0.0 {
                    return Err(ConfigError::ValueOutOfRange(
                        "Pressure ratios and travel must be positive",
                    ));
                }
                if !(0.0..=50.0).contains(&unit.sag_percent) {
                    return Err(ConfigError::ValueOutOfRange(
                        "Sag targets must be between 0% and 50%",
                    ));
                }
            }
        }
        if presets
            .windows(2)
            .any(|pair| pair[0].fork.pressure_ratio_psi_per_kg > pair[1].fork.pressure_ratio_psi_per_kg)
        {
            return Err(ConfigError::InvalidRange(
                "Fork pressure ratios must not decrease with travel",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}: '{val}'")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        let dt = &mut self.drivetrain;
        Self::apply_env_var(ENV_DEFAULT_CADENCE_RPM, &mut dt.defaults.cadence_rpm)?;
        Self::apply_env_var(
            ENV_DEFAULT_WHEEL_DIAMETER_IN,
            &mut dt.defaults.wheel_diameter_in,
        )?;
        Self::apply_env_var(ENV_FREEHUB_FIX_COST, &mut dt.compatibility.freehub_fix_cost)?;
        Self::apply_env_var(
            ENV_DERAILLEUR_UPGRADE_COST,
            &mut dt.compatibility.derailleur_upgrade_cost,
        )?;
        Self::apply_env_var(
            ENV_CHAIN_REPLACEMENT_COST,
            &mut dt.compatibility.chain_replacement_cost,
        )?;

        Self::apply_env_var(
            ENV_TIRE_CONFIDENCE_FLOOR,
            &mut self.tire_pressure.confidence.floor,
        )?;

        Self::apply_env_var(
            ENV_SUSPENSION_REFERENCE_WEIGHT_KG,
            &mut self.suspension.reference_weight_kg,
        )?;

        Ok(self)
    }
}

fn product(a: &TerrainTable<f64>, b: &TerrainTable<f64>) -> [f64; 5] {
    let (a, b) = (a.ordered(), b.ordered());
    [
        a[0] * b[0],
        a[1] * b[1],
        a[2] * b[2],
        a[3] * b[3],
        a[4] * b[4],
    ]
}

fn strictly_descending(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] > pair[1])
}
