// ABOUTME: Tire pressure engine configuration with terrain-keyed factor tables
// ABOUTME: Contact patch model, adjustment multipliers, safe range bands and confidence scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! Tire Pressure Configuration
//!
//! Every terrain-dependent constant is a [`TerrainTable`]: one field per terrain,
//! read through [`TerrainTable::get`]. Terrain factors are further keyed by tire
//! width band.
//!
//! Terrain factor × front (or rear) split, and terrain factor × tubeless factor,
//! must fall from road to downhill in every width band: rougher terrain never
//! yields a higher pressure for the same rider and tire. Validation enforces it.

use crate::tire_pressure::{SurfaceCondition, Terrain, WidthBand};
use serde::{Deserialize, Serialize};

/// One value per terrain category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainTable<T> {
    /// Paved road
    pub road: T,
    /// Gravel and hardpack
    pub gravel: T,
    /// Singletrack trail
    pub trail: T,
    /// Enduro, rough and steep
    pub enduro: T,
    /// Downhill, bike park
    pub downhill: T,
}

impl<T> TerrainTable<T> {
    /// Value for a terrain
    #[must_use]
    pub const fn get(&self, terrain: Terrain) -> &T {
        match terrain {
            Terrain::Road => &self.road,
            Terrain::Gravel => &self.gravel,
            Terrain::Trail => &self.trail,
            Terrain::Enduro => &self.enduro,
            Terrain::Downhill => &self.downhill,
        }
    }

    /// Values in road → downhill order
    #[must_use]
    pub const fn ordered(&self) -> [&T; 5] {
        [
            &self.road,
            &self.gravel,
            &self.trail,
            &self.enduro,
            &self.downhill,
        ]
    }
}

/// Inclusive range of values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Band {
    /// Whether `value` lies within the band
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Tire pressure engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TirePressureConfig {
    /// Load to contact patch model
    pub contact_patch: ContactPatchConfig,
    /// Width band boundaries
    pub width_bands: WidthBandsConfig,
    /// Terrain factors per width band
    pub terrain_factors: TerrainFactorsByWidth,
    /// Tubeless multipliers (applied only when tubeless)
    pub tubeless_factors: TerrainTable<f64>,
    /// Surface condition multipliers
    pub condition_factors: ConditionFactorsConfig,
    /// Ride priority multipliers
    pub priority_factors: PriorityFactorsConfig,
    /// Front/rear split multipliers
    pub weight_distribution: WeightDistributionConfig,
    /// Safe range band around the adjusted pressure, as fractions
    pub safe_range: TerrainTable<Band>,
    /// Lowest pressure before pinch flats become likely with tubes (PSI)
    pub pinch_flat_floor_psi: TerrainTable<f64>,
    /// Widths considered common for each terrain (mm)
    pub common_widths_mm: TerrainTable<Band>,
    /// Confidence scoring
    pub confidence: TireConfidenceConfig,
}

/// Contact patch model: `area = base + per_mm × width`, load shared between tires
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPatchConfig {
    /// Area intercept (square inches)
    pub base_area_sq_in: f64,
    /// Area added per mm of tire width (square inches)
    pub area_per_mm_sq_in: f64,
    /// Fraction of total weight carried by one tire
    pub load_share_per_tire: f64,
}

/// Width band boundaries (mm)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidthBandsConfig {
    /// Widths up to this are narrow
    pub narrow_max_mm: f64,
    /// Widths up to this (and above narrow) are medium; wider is wide
    pub medium_max_mm: f64,
}

impl WidthBandsConfig {
    /// Band for a tire width
    #[must_use]
    pub fn classify(&self, width_mm: f64) -> WidthBand {
        if width_mm <= self.narrow_max_mm {
            WidthBand::Narrow
        } else if width_mm <= self.medium_max_mm {
            WidthBand::Medium
        } else {
            WidthBand::Wide
        }
    }
}

/// Terrain factors keyed by width band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainFactorsByWidth {
    /// Road and narrow gravel tires
    pub narrow: TerrainTable<f64>,
    /// Gravel and light XC tires
    pub medium: TerrainTable<f64>,
    /// Mountain bike tires
    pub wide: TerrainTable<f64>,
}

impl TerrainFactorsByWidth {
    /// Terrain factor table for a width band
    #[must_use]
    pub const fn for_band(&self, band: WidthBand) -> &TerrainTable<f64> {
        match band {
            WidthBand::Narrow => &self.narrow,
            WidthBand::Medium => &self.medium,
            WidthBand::Wide => &self.wide,
        }
    }
}

/// Surface condition multipliers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionFactorsConfig {
    /// Wet pavement
    pub wet_road: f64,
    /// Wet loose surfaces
    pub wet_loose: f64,
    /// Mixed conditions on pavement
    pub mixed_road: f64,
    /// Mixed conditions on loose surfaces
    pub mixed_loose: f64,
}

impl ConditionFactorsConfig {
    /// Multiplier for a condition on a terrain
    #[must_use]
    pub fn factor(&self, condition: SurfaceCondition, terrain: Terrain) -> f64 {
        let loose = terrain.is_loose();
        match condition {
            SurfaceCondition::Dry => 1.0,
            SurfaceCondition::Wet if loose => self.wet_loose,
            SurfaceCondition::Wet => self.wet_road,
            SurfaceCondition::Mixed if loose => self.mixed_loose,
            SurfaceCondition::Mixed => self.mixed_road,
        }
    }
}

/// Ride priority multipliers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityFactorsConfig {
    /// Comfort: softer
    pub comfort: f64,
    /// Grip: softer
    pub grip: f64,
    /// Speed: firmer, clamped to 1.0 on technical terrain
    pub speed: f64,
}

/// Front and rear multipliers on the adjusted pressure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightDistributionConfig {
    /// Front multiplier
    pub front: TerrainTable<f64>,
    /// Rear multiplier
    pub rear: TerrainTable<f64>,
}

/// Confidence scoring for tire pressure results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TireConfidenceConfig {
    /// Starting score
    pub base: f64,
    /// Score never reported below this
    pub floor: f64,
    /// Bonus when the width is common for the terrain
    pub common_width_bonus: f64,
    /// Penalty when the width is unusual for the terrain
    pub uncommon_width_penalty: f64,
    /// System weight above which the model is less reliable (kg)
    pub heavy_system_kg: f64,
    /// System weight below which the model is less reliable (kg)
    pub light_system_kg: f64,
    /// Penalty for extreme system weight
    pub extreme_weight_penalty: f64,
    /// Penalty for non-dry conditions
    pub condition_penalty: f64,
}

impl Default for ContactPatchConfig {
    fn default() -> Self {
        Self {
            base_area_sq_in: 0.1,
            area_per_mm_sq_in: 0.04,
            load_share_per_tire: 0.5,
        }
    }
}

impl Default for WidthBandsConfig {
    fn default() -> Self {
        Self {
            narrow_max_mm: 35.0,
            medium_max_mm: 50.0,
        }
    }
}

impl Default for TerrainFactorsByWidth {
    fn default() -> Self {
        Self {
            narrow: TerrainTable {
                road: 1.00,
                gravel: 0.90,
                trail: 0.82,
                enduro: 0.76,
                downhill: 0.70,
            },
            medium: TerrainTable {
                road: 0.95,
                gravel: 0.85,
                trail: 0.77,
                enduro: 0.71,
                downhill: 0.65,
            },
            wide: TerrainTable {
                road: 0.92,
                gravel: 0.82,
                trail: 0.75,
                enduro: 0.68,
                downhill: 0.62,
            },
        }
    }
}

impl Default for ConditionFactorsConfig {
    fn default() -> Self {
        Self {
            wet_road: 0.97,
            wet_loose: 0.94,
            mixed_road: 1.0,
            mixed_loose: 0.97,
        }
    }
}

impl Default for PriorityFactorsConfig {
    fn default() -> Self {
        Self {
            comfort: 0.93,
            grip: 0.95,
            speed: 1.05,
        }
    }
}

impl Default for WeightDistributionConfig {
    fn default() -> Self {
        Self {
            front: TerrainTable {
                road: 0.96,
                gravel: 0.95,
                trail: 0.94,
                enduro: 0.93,
                downhill: 0.92,
            },
            rear: TerrainTable {
                road: 1.04,
                gravel: 1.05,
                trail: 1.06,
                enduro: 1.07,
                downhill: 1.08,
            },
        }
    }
}

impl Default for TireConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 85.0,
            floor: 50.0,
            common_width_bonus: 10.0,
            uncommon_width_penalty: 15.0,
            heavy_system_kg: 120.0,
            light_system_kg: 55.0,
            extreme_weight_penalty: 10.0,
            condition_penalty: 5.0,
        }
    }
}

impl Default for TirePressureConfig {
    fn default() -> Self {
        Self {
            contact_patch: ContactPatchConfig::default(),
            width_bands: WidthBandsConfig::default(),
            terrain_factors: TerrainFactorsByWidth::default(),
            tubeless_factors: TerrainTable {
                road: 0.95,
                gravel: 0.92,
                trail: 0.90,
                enduro: 0.88,
                downhill: 0.87,
            },
            condition_factors: ConditionFactorsConfig::default(),
            priority_factors: PriorityFactorsConfig::default(),
            weight_distribution: WeightDistributionConfig::default(),
            safe_range: TerrainTable {
                road: Band { min: 0.90, max: 1.10 },
                gravel: Band { min: 0.88, max: 1.12 },
                trail: Band { min: 0.85, max: 1.15 },
                enduro: Band { min: 0.82, max: 1.18 },
                downhill: Band { min: 0.80, max: 1.20 },
            },
            pinch_flat_floor_psi: TerrainTable {
                road: 60.0,
                gravel: 30.0,
                trail: 22.0,
                enduro: 24.0,
                downhill: 25.0,
            },
            common_widths_mm: TerrainTable {
                road: Band { min: 23.0, max: 32.0 },
                gravel: Band { min: 32.0, max: 50.0 },
                trail: Band { min: 55.0, max: 66.0 },
                enduro: Band { min: 58.0, max: 70.0 },
                downhill: Band { min: 60.0, max: 75.0 },
            },
            confidence: TireConfidenceConfig::default(),
        }
    }
}
